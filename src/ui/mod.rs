//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Latest quotes, trigger summary, and the price chart
//! - [`triggers`]: Buy/sell trigger price tables with cooldown status
//! - [`tokens`]: Configured token alerts table
//! - [`settings`]: Inline-editable server settings
//! - [`form`]: Modal overlay for creating a token alert
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/triggers/tokens/settings   │
//! │  ::render)                           │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (render_status_bar)       │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - form::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod form;
pub mod overview;
pub mod settings;
pub mod theme;
pub mod tokens;
pub mod triggers;

pub use theme::{Theme, ThemeMode};
