//! # dmxmon-app
//!
//! Application layer — the channel monitor and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ChannelSource` — fetch the current channel values of a universe
//!   - `CellRenderer` — create and restyle the 512 display cells
//! - Provide the **`ChannelMonitor`** state machine: enable/disable, lazy
//!   cell setup, rendering of received values
//! - Provide the **poll loop** that drives the monitor on its own task and
//!   the `MonitorHandle` used to control it
//!
//! ## Dependency rule
//! Depends on `dmxmon-domain` only (plus `tokio` for the poll task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod monitor;
pub mod poll;
pub mod ports;

#[cfg(test)]
mod testing;
