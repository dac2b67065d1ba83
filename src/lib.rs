// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # jupwatch
//!
//! A terminal dashboard and client library for a Jupiter USDC price alert
//! server.
//!
//! This crate renders the alert server's state in an interactive TUI:
//! latest buy/sell quotes and their history, the configured trigger prices
//! with cooldown countdowns, and the token alerts list. Every mutation the
//! server supports (trigger prices, token alerts, USD amount, reset
//! interval) can be driven from the keyboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(processing)   │(rendering)   │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │ commands ▲ events                                    │
//! │       ▼          │                                           │
//! │  ┌──────────────────┐         ┌──────────────────────┐      │
//! │  │ api::ApiHandle   │◀───────▶│ worker task (tokio)  │──HTTP│
//! │  │ (channel bridge) │         │ one request at a time│      │
//! │  └──────────────────┘         └──────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`api`]**: Wire types, the HTTP client, and the background worker that
//!   bridges async requests into the synchronous render loop
//! - **[`data`]**: Snapshot processing - joins trigger prices with their
//!   last-fired instants, computes cooldown status, and preps chart series
//! - **[`ui`]**: Terminal rendering using ratatui - quote cards, the price
//!   chart, trigger/alert tables, and theme support
//! - **[`config`]**: Layered settings (defaults, config file, environment)
//! - **[`form`]**: The token alert creation form
//!
//! ## Status model
//!
//! A trigger's status is a pure function of its last-fired time, the reset
//! interval, and the clock: never fired means Active; within the interval
//! means Cooldown with an `MM:SS` countdown; past it means Active again. A
//! zero interval turns a fired trigger Inactive for good.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Dashboard against a local alert server
//! jupwatch --url http://127.0.0.1:8000
//!
//! # Faster refresh, forced dark theme
//! jupwatch --refresh 15 --theme dark
//! ```
//!
//! ### As a library with a detached handle
//!
//! ```
//! use jupwatch::{ApiHandle, App, Theme};
//!
//! // The detached handle exposes both channel ends; feed events from
//! // anywhere and read the commands the app queues.
//! let (api, _commands, _events) = ApiHandle::detached();
//! let mut app = App::new(api, Theme::dark());
//! app.request_state();
//! ```
//!
//! ### As a library with the spawned worker
//!
//! ```no_run
//! use jupwatch::{ApiClient, ApiHandle, App, Theme};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::new("http://127.0.0.1:8000");
//! let (api, task) = ApiHandle::spawn(client);
//! let mut app = App::new(api, Theme::dark());
//! app.refresh();
//! // ... run the render loop, then:
//! task.abort();
//! # });
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod form;
pub mod ui;

// Re-export main types for convenience
pub use api::wire::{
    AlertKind, Condition, NewAlert, PricePoint, Side, StateSnapshot, TokenAlert, TokenInfo,
};
pub use api::{Action, ApiClient, ApiError, ApiEvent, ApiHandle, Command};
pub use app::App;
pub use config::Settings;
pub use data::{AlertStatus, Dashboard, PriceHistory, StatusCounts, Trigger};
pub use form::AlertForm;
pub use ui::{Theme, ThemeMode};
