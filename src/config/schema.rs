//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{Config, RootCommand};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashSet;

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    validate_label(&config.namespace)?;

    let mut labels = HashSet::new();
    for root in [&config.commands.admin, &config.commands.player] {
        validate_root_command(root, &mut labels)?;
    }

    if config.vote_party.threshold <= 0 {
        return Err(ConfigError::InvalidThreshold(config.vote_party.threshold));
    }

    let permissions = &config.modules.permissions;
    if permissions.enabled {
        for permission in [&permissions.milestones, &permissions.streaks] {
            if permission.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Module permissions must not be empty".to_string(),
                ));
            }
        }
    }

    for name in config.users.keys() {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!("Invalid user name: '{}'", name)));
        }
    }

    Ok(())
}

/// Validate one root command, recording its labels in `seen`
fn validate_root_command(root: &RootCommand, seen: &mut HashSet<String>) -> ConfigResult<()> {
    for label in std::iter::once(&root.base).chain(root.aliases.iter()) {
        validate_label(label)?;
        if !seen.insert(label.to_lowercase()) {
            return Err(ConfigError::DuplicateLabel(label.clone()));
        }
    }

    if let Some(permission) = &root.permission {
        if permission.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Permission of command '{}' must not be empty",
                root.base
            )));
        }
    }

    Ok(())
}

/// A label must be one non-empty word without `:`
fn validate_label(label: &str) -> ConfigResult<()> {
    if label.is_empty() || label.contains(':') || label.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidLabel(label.to_string()));
    }
    Ok(())
}
