//! Player-facing messages
//!
//! Templates use `%name%` placeholders and `&`-style color codes, the way the
//! game server's chat does. This module fills placeholders, renders color
//! codes for a terminal, and keeps the catalog of configurable templates.

pub mod catalog;
pub mod color;
pub mod placeholder;

// Re-export main types
pub use catalog::*;
pub use color::*;
pub use placeholder::*;
