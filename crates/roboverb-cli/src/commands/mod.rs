//! CLI command implementations.

pub mod common;
pub mod impulse;
pub mod info;
pub mod presets;
pub mod process;
