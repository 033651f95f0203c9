//! Error types for cmdtree

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cmdtree operations
pub type Result<T> = std::result::Result<T, CmdError>;

/// Main error type for cmdtree
#[derive(Error, Debug)]
pub enum CmdError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Message template errors
    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A command line whose first word names no registered command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Command label '{0}' must be a single lowercase word without ':'")]
    InvalidLabel(String),

    #[error("Command label '{0}' is used by more than one root command")]
    DuplicateLabel(String),

    #[error("Vote party threshold must be positive, got {0}")]
    InvalidThreshold(i64),
}

/// Message template errors
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Placeholder arguments must come in key/value pairs (got {0} items)")]
    UnpairedPlaceholders(usize),

    #[error("Invalid placeholder key '{0}'")]
    InvalidPlaceholder(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for message operations
pub type MessageResult<T> = std::result::Result<T, MessageError>;
