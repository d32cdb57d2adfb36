//! Request handlers.

pub mod commands;
pub mod health;

pub use commands::*;
pub use health::*;
