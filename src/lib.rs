//! cmdtree - an embeddable hierarchical command dispatcher
//!
//! Commands form a tree of [`CommandNode`]s. A line typed by a console or a
//! connected user is resolved one word per level, gated by per-node
//! permissions, and handed to the matching handler with typed argument
//! access. The same tree answers tab-completion requests.
//!
//! The crate also carries a reference host: a console application that runs
//! the vote-tallying admin and player commands on top of the dispatcher.

// Public modules
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod message;
pub mod votes;

// Re-export commonly used types
pub use command::{
    Actor, Arguments, CommandMap, CommandNode, CommandRegistry, CommandTable, Host, User,
};
pub use error::{CmdError, Result};

/// Current version of cmdtree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
