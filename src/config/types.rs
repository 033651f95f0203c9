//! Core configuration types
//!
//! This module defines the data structures that represent a cmdtree.yml configuration file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default namespace prefix for command labels
pub const DEFAULT_NAMESPACE: &str = "phantomvoting";

/// Default permission guarding the admin command tree
pub const DEFAULT_ADMIN_PERMISSION: &str = "phantomvoting.admin";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Namespace used for `namespace:label` fallback labels
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Root command names and aliases
    #[serde(default)]
    pub commands: Commands,

    /// Optional features
    #[serde(default)]
    pub modules: Modules,

    /// Community vote party settings
    #[serde(default)]
    pub vote_party: VoteParty,

    /// Vote totals that count as milestones
    #[serde(default = "default_milestones")]
    pub milestones: Vec<u32>,

    /// Known users, keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub users: BTreeMap<String, UserEntry>,

    /// Message template overrides, keyed by message name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<String, String>,
}

/// The two root commands
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Commands {
    #[serde(default = "default_admin_command")]
    pub admin: RootCommand,

    #[serde(default = "default_player_command")]
    pub player: RootCommand,
}

/// Label configuration of one root command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootCommand {
    /// Primary label
    pub base: String,

    /// Alternate labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Permission required to use the command at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

/// Feature toggles
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Modules {
    #[serde(default = "default_true")]
    pub milestones: bool,

    #[serde(default = "default_true")]
    pub streaks_menu: bool,

    #[serde(default = "default_true")]
    pub vote_reminder: bool,

    /// Per-module permission requirements
    #[serde(default)]
    pub permissions: ModulePermissions,
}

/// Permissions players need for individual modules, when enabled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModulePermissions {
    /// Whether the module permissions are checked at all
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_milestones_permission")]
    pub milestones: String,

    #[serde(default = "default_streaks_permission")]
    pub streaks: String,
}

/// Vote party settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoteParty {
    /// Votes needed to start a party
    #[serde(default = "default_threshold")]
    pub threshold: i64,
}

/// A user known to the console host
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserEntry {
    /// Permissions granted to the user
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    /// Whether the user counts as connected
    #[serde(default = "default_true")]
    pub online: bool,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_admin_command() -> RootCommand {
    RootCommand {
        base: "phantomvoting".to_string(),
        aliases: vec!["pv".to_string()],
        permission: Some(DEFAULT_ADMIN_PERMISSION.to_string()),
    }
}

fn default_player_command() -> RootCommand {
    RootCommand {
        base: "vote".to_string(),
        aliases: vec!["votes".to_string()],
        permission: None,
    }
}

fn default_milestones_permission() -> String {
    "phantomvoting.milestones".to_string()
}

fn default_streaks_permission() -> String {
    "phantomvoting.streaks".to_string()
}

fn default_milestones() -> Vec<u32> {
    vec![10, 50, 100]
}

fn default_threshold() -> i64 {
    50
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: default_namespace(),
            commands: Commands::default(),
            modules: Modules::default(),
            vote_party: VoteParty::default(),
            milestones: default_milestones(),
            users: BTreeMap::new(),
            messages: HashMap::new(),
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Commands {
            admin: default_admin_command(),
            player: default_player_command(),
        }
    }
}

impl Default for Modules {
    fn default() -> Self {
        Modules {
            milestones: true,
            streaks_menu: true,
            vote_reminder: true,
            permissions: ModulePermissions::default(),
        }
    }
}

impl Default for ModulePermissions {
    fn default() -> Self {
        ModulePermissions {
            enabled: false,
            milestones: default_milestones_permission(),
            streaks: default_streaks_permission(),
        }
    }
}

impl Default for UserEntry {
    fn default() -> Self {
        UserEntry {
            permissions: Vec::new(),
            online: true,
        }
    }
}

impl Default for VoteParty {
    fn default() -> Self {
        VoteParty {
            threshold: default_threshold(),
        }
    }
}

impl Config {
    /// Permission guarding the admin tree
    pub fn admin_permission(&self) -> &str {
        self.commands
            .admin
            .permission
            .as_deref()
            .unwrap_or(DEFAULT_ADMIN_PERMISSION)
    }

    /// Look up a configured user case-insensitively
    pub fn user(&self, name: &str) -> Option<(&str, &UserEntry)> {
        self.users
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Names of users marked online, sorted
    pub fn online_users(&self) -> impl Iterator<Item = &str> {
        self.users
            .iter()
            .filter(|(_, entry)| entry.online)
            .map(|(name, _)| name.as_str())
    }
}
