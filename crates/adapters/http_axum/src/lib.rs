//! # dmxmon-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Host the monitor's display: [`grid::GridRenderer`] implements the
//!   `CellRenderer` port by keeping every cell's text and colours in memory
//! - Serve the grid as a **server-side-rendered HTML page** that refreshes
//!   itself with `<meta http-equiv="refresh">` (no JavaScript)
//! - Serve a small **JSON API** (`/api/cells`, `/api/monitor`)
//! - Map enable/disable requests onto `MonitorHandle::set_state`
//!
//! ## Dependency rule
//! Depends on `dmxmon-app` (ports, monitor handle) and `dmxmon-domain`
//! (cell and universe types). Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod router;
pub mod state;
