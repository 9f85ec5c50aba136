//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the monitor and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod cell_renderer;
pub mod channel_source;

pub use cell_renderer::CellRenderer;
pub use channel_source::ChannelSource;
