//! # dmxmon-adapter-virtual
//!
//! Virtual channel source that serves DMX frames from memory.
//!
//! ## Provided pieces
//!
//! | Type | Behaviour |
//! |------|-----------|
//! | [`UniverseStore`] | Keeps the latest frame pushed for each universe and serves it as a `ChannelSource` |
//! | [`Chase`] | Demo pattern: a block of lit channels walking across a universe |
//!
//! ## Dependency rule
//!
//! Depends on `dmxmon-app` (port traits) and `dmxmon-domain` only.

mod chase;
mod store;

pub use chase::{Chase, spawn_chase};
pub use store::UniverseStore;
