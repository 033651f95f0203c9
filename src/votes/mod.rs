//! Vote tallying commands
//!
//! The admin and player command trees of the vote add-on, built on the
//! dispatcher. Handlers share state through a cloneable [`VoteContext`].

pub mod admin;
pub mod player;
pub mod store;

pub use admin::admin_command;
pub use player::player_command;
pub use store::*;

use crate::command::{Actor, CommandRegistry, CommandTable, Host};
use crate::config::{parse_config_file, validate_config, Config};
use crate::message::{strip_codes, MessageCatalog};
use chrono::{Local, NaiveDate};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

/// Configuration together with the message catalog built from it
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub messages: MessageCatalog,
}

impl Settings {
    pub fn new(config: Config) -> Self {
        let messages = MessageCatalog::with_overrides(&config.messages);
        Settings { config, messages }
    }
}

/// Vote bookkeeping shared by all handlers
#[derive(Debug)]
pub struct VoteState {
    pub store: VoteStore,
    pub party: VoteParty,
}

/// Handle to everything the vote commands need
#[derive(Debug, Clone)]
pub struct VoteContext {
    pub settings: Rc<RefCell<Settings>>,
    pub state: Rc<RefCell<VoteState>>,
    config_path: Option<PathBuf>,
    rebuild_requested: Rc<Cell<bool>>,
    pinned_date: Rc<Cell<Option<NaiveDate>>>,
}

impl VoteContext {
    /// Create a context; `config_path` is the file re-read on reload
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let party = VoteParty::new(config.vote_party.threshold);
        VoteContext {
            settings: Rc::new(RefCell::new(Settings::new(config))),
            state: Rc::new(RefCell::new(VoteState {
                store: VoteStore::new(),
                party,
            })),
            config_path,
            rebuild_requested: Rc::new(Cell::new(false)),
            pinned_date: Rc::new(Cell::new(None)),
        }
    }

    /// Today's date for vote bookkeeping: the pinned date, or the local date
    pub fn today(&self) -> NaiveDate {
        self.pinned_date
            .get()
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Fix the date used for vote bookkeeping; `None` follows the local clock
    pub fn pin_date(&self, date: Option<NaiveDate>) {
        self.pinned_date.set(date);
    }

    /// Send the catalog message `key` to `actor`
    pub fn send(
        &self,
        host: &dyn Host,
        actor: &Actor,
        key: &str,
        pairs: &[&str],
    ) -> anyhow::Result<()> {
        let message = self.settings.borrow().messages.format(key, pairs)?;
        host.send_message(actor, &message);
        Ok(())
    }

    /// Send the catalog message `key` to the console and every online user
    pub fn broadcast(&self, host: &dyn Host, key: &str, pairs: &[&str]) -> anyhow::Result<()> {
        let message = self.settings.borrow().messages.format(key, pairs)?;
        let online: Vec<String> = self
            .settings
            .borrow()
            .config
            .online_users()
            .map(str::to_string)
            .collect();

        info!(text = %strip_codes(&message), "broadcast");
        host.send_message(&Actor::Console, &message);
        for name in online {
            if let Some(user) = host.lookup_user(&name) {
                host.send_message(&Actor::User(user), &message);
            }
        }
        Ok(())
    }

    /// Online user names starting with `partial`, ignoring case
    pub fn online_users_matching(&self, partial: &str) -> Vec<String> {
        let partial = partial.to_lowercase();
        self.settings
            .borrow()
            .config
            .online_users()
            .filter(|name| name.to_lowercase().starts_with(&partial))
            .map(str::to_string)
            .collect()
    }

    /// Re-read the configuration file and ask the host to rebuild the command tree
    pub fn reload(&self) -> crate::Result<()> {
        let config = match &self.config_path {
            Some(path) => parse_config_file(path)?,
            None => self.settings.borrow().config.clone(),
        };
        validate_config(&config)?;

        self.state
            .borrow_mut()
            .party
            .set_threshold(config.vote_party.threshold);
        *self.settings.borrow_mut() = Settings::new(config);
        self.rebuild_requested.set(true);

        info!(path = ?self.config_path, "configuration reloaded");
        Ok(())
    }

    /// Whether a reload asked for the command tree to be rebuilt; clears the request
    pub fn take_rebuild_request(&self) -> bool {
        self.rebuild_requested.replace(false)
    }

    /// Whether the module is enabled in the current configuration
    pub fn module_enabled(&self, module: fn(&crate::config::Modules) -> bool) -> bool {
        module(&self.settings.borrow().config.modules)
    }
}

/// Register the admin and player commands under the configured namespace
pub fn register_commands<T: CommandTable>(ctx: &VoteContext, table: &mut T) {
    let namespace = ctx.settings.borrow().config.namespace.clone();
    let mut registry = CommandRegistry::new(&namespace, table);
    registry.register_command(player_command(ctx));
    registry.register_command(admin_command(ctx));
}

/// Completer suggesting online user names for the first argument only
pub(crate) fn user_completer(
    ctx: &VoteContext,
) -> impl Fn(&Actor, &[String]) -> anyhow::Result<Option<Vec<String>>> + 'static {
    let ctx = ctx.clone();
    move |_actor: &Actor, args: &[String]| -> anyhow::Result<Option<Vec<String>>> {
        match args {
            [partial] => Ok(Some(ctx.online_users_matching(partial))),
            _ => Ok(Some(Vec::new())),
        }
    }
}
