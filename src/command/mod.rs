//! Hierarchical command dispatch
//!
//! This module holds the command tree, the argument accessor handed to
//! handlers, and the glue that registers root commands with a host table.

pub mod actor;
pub mod args;
pub mod node;
pub mod registry;

// Re-export main types
pub use actor::*;
pub use args::*;
pub use node::*;
pub use registry::*;
