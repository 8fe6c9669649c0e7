/// Command-line configuration.
pub mod config;
/// Text rendering of positions.
pub mod render;
/// The interactive command loop.
pub mod shell;

pub use config::*;
pub use render::*;
pub use shell::*;
