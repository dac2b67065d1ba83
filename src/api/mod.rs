//! HTTP access to the alert server.
//!
//! This module owns everything network-facing: the wire types matching the
//! server's JSON, the reqwest client with one method per endpoint, and the
//! background worker that bridges async calls to the synchronous render
//! loop through a pair of channels.

pub mod client;
pub mod error;
pub mod wire;
pub mod worker;

pub use client::ApiClient;
pub use error::ApiError;
pub use worker::{Action, ApiEvent, ApiHandle, Command};
