//! Data models and processing for dashboard snapshots.
//!
//! This module handles the transformation of raw server state into
//! structured, status-annotated data suitable for display.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Processed dashboard model ([`Dashboard`], [`Trigger`])
//! - [`history`]: Price history backing the chart
//! - [`status`]: Trigger status computation and countdown formatting
//!
//! ## Data Flow
//!
//! ```text
//! StateSnapshot (raw JSON)
//!        │
//!        ▼
//! Dashboard::from_snapshot()
//!        │
//!        ├──▶ Trigger (last-fired timestamp joined by price key)
//!        │
//!        └──▶ PriceHistory (capped, chart-ready series)
//! ```

pub mod dashboard;
pub mod history;
pub mod status;

pub use dashboard::{Dashboard, StatusCounts, Trigger};
pub use history::PriceHistory;
pub use status::{format_countdown, parse_timestamp, price_key, status_at, AlertStatus};
