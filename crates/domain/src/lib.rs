//! # dmxmon-domain
//!
//! Pure domain model for the dmxmon DMX channel monitor.
//!
//! ## Responsibilities
//! - Foundational types: universe identifiers, error conventions
//! - Define **channel values** (one DMX frame as received from a lighting server)
//! - Define **cells** (one display slot per DMX channel) and how a channel
//!   value maps onto a cell's text and colours
//! - Hold the fixed constants of the DMX wire format (512 channels, 0–255)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod universe;

pub mod cell;
pub mod channel;
