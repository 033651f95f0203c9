//! Message templates keyed by name

use crate::error::MessageResult;
use crate::message::placeholder::render_pairs;
use std::collections::HashMap;

/// Built-in templates, overridable from configuration
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (
        "ADMIN_HELP",
        concat!(
            "&6&lPhantomVoting admin &7- &e/%admin_command% ",
            "<reload|givevote|testvote|removevote|voteparty|streaks>"
        ),
    ),
    ("RELOAD", "&aConfiguration reloaded."),
    ("GIVE_VOTE", "&aGave &f%amount% &avote(s) to &f%player%&a."),
    ("REMOVE_VOTE", "&aRemoved &f%amount% &avote(s) from &f%player%&a."),
    ("TEST_VOTE", "&aSimulated a vote for &f%player%&a."),
    ("VOTE_RECEIVED", "&aThanks for voting, &f%player%&a! You now have &f%total% &avote(s)."),
    ("VOTE_PARTY_PROGRESS", "&eVote party: &f%current%&7/&f%required%"),
    ("VOTE_PARTY_START", "&d&lVOTE PARTY! &fThe community reached &d%required% &fvotes."),
    ("VOTE_PARTY_SET", "&aVote party progress set to &f%current%&7/&f%required%&a."),
    ("STREAK_RESET", "&aReset the vote streak of &f%player%&a."),
    ("STREAK_SET", "&aSet the vote streak of &f%player% &ato &f%streak%&a."),
    ("STREAK_ADD", "&aAdded &f%streak% &ato the vote streak of &f%player%&a."),
    ("VOTE_LIST", "&eYou have &f%daily_votes% &evote(s) today and &f%total_votes% &ein total."),
    ("LEADERBOARD_HEADER", "&6&lTop voters"),
    ("LEADERBOARD_ENTRY", "&e#%position% &f%player% &7- &f%votes%"),
    ("LEADERBOARD_EMPTY", "&7Nobody has voted yet."),
    ("MILESTONES", "&eMilestones: %milestones%"),
    ("STREAK_INFO", "&eYour current vote streak is &f%streak%&e."),
    ("VOTE_REMINDER_TOGGLE", "&eVote reminders &f%status%&e."),
    ("MODULE_DISABLED", "&cThis feature is disabled."),
    ("NO_PERMISSION", "&cYou do not have permission to do that."),
];

/// Named message templates
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog with only the built-in templates
    pub fn new() -> Self {
        MessageCatalog {
            templates: DEFAULT_MESSAGES
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }

    /// Built-in templates with `overrides` layered on top
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::new();
        for (key, template) in overrides {
            catalog.templates.insert(key.to_uppercase(), template.clone());
        }
        catalog
    }

    /// Raw template for `key`, `None` if unknown
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Template for `key` with placeholders filled; an unknown key renders as itself
    pub fn format(&self, key: &str, pairs: &[&str]) -> MessageResult<String> {
        let template = self.template(key).unwrap_or(key);
        render_pairs(template, pairs)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}
