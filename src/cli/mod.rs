//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, the interactive console loop,
//! and the host that prints messages to the terminal.

pub mod app;
pub mod host;

// Re-export main types
pub use app::*;
pub use host::ConsoleHost;
