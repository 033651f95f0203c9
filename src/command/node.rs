//! Command tree nodes and the recursive dispatcher
//!
//! A [`CommandNode`] is built once with a builder chain, handed to the command
//! table, and from then on only read. Dispatch consumes one token per level:
//! if the next token names a child the child takes over, otherwise the node
//! runs its own handler with whatever tokens remain.

use crate::command::actor::{Actor, Host, User};
use crate::command::args::Arguments;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Notice sent when a user-only command is run by another kind of actor
pub const USER_ONLY_NOTICE: &str = "This command can only be executed by players.";

/// Handler runnable by any actor
pub type Handler = Box<dyn Fn(&Actor, &mut Arguments<'_>) -> anyhow::Result<()>>;

/// Handler runnable only by a live user
pub type UserHandler = Box<dyn Fn(&User, &mut Arguments<'_>) -> anyhow::Result<()>>;

/// Custom tab completer
///
/// Receives the raw remaining tokens. `Ok(None)` defers to the default
/// child-name completion.
pub type Completer = Box<dyn Fn(&Actor, &[String]) -> anyhow::Result<Option<Vec<String>>>>;

/// One level of the command tree
pub struct CommandNode {
    name: String,
    description: String,
    usage: String,
    aliases: Vec<String>,
    permission: Option<String>,
    handler: Option<Handler>,
    user_handler: Option<UserHandler>,
    completer: Option<Completer>,
    children: BTreeMap<String, CommandNode>,
}

impl CommandNode {
    /// Create a node; the name is lowercased
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().to_lowercase();
        CommandNode {
            usage: format!("/{}", name),
            name,
            description: String::new(),
            aliases: Vec::new(),
            permission: None,
            handler: None,
            user_handler: None,
            completer: None,
            children: BTreeMap::new(),
        }
    }

    /// Set the description shown by the host
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the usage line shown by the host
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the alternate labels used when registering with the host
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set the handler for any actor
    pub fn executes<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Actor, &mut Arguments<'_>) -> anyhow::Result<()> + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Set the handler for live users only; takes priority over [`CommandNode::executes`]
    pub fn executes_user<F>(mut self, handler: F) -> Self
    where
        F: Fn(&User, &mut Arguments<'_>) -> anyhow::Result<()> + 'static,
    {
        self.user_handler = Some(Box::new(handler));
        self
    }

    /// Require `permission` to reach this node or anything below it
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set a custom tab completer
    pub fn with_completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&Actor, &[String]) -> anyhow::Result<Option<Vec<String>>> + 'static,
    {
        self.completer = Some(Box::new(completer));
        self
    }

    /// Attach a child; a child with the same name is replaced
    pub fn with_subcommand(mut self, child: CommandNode) -> Self {
        self.children.insert(child.name.clone(), child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    /// Look up a direct child, case-insensitively
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(&name.to_lowercase())
    }

    /// Direct children in name order
    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    /// Whether `actor` passes this node's own permission gate
    pub fn is_permitted(&self, host: &dyn Host, actor: &Actor) -> bool {
        match &self.permission {
            Some(permission) => host.has_permission(actor, permission),
            None => true,
        }
    }

    /// Resolve and run a command
    ///
    /// `label` is the token that selected this node and `args` the tokens
    /// after it. Always returns `true`: denied permissions, unknown
    /// subcommands and failing handlers all count as handled.
    pub fn execute(&self, host: &dyn Host, actor: &Actor, label: &str, args: &[String]) -> bool {
        if !self.is_permitted(host, actor) {
            debug!(command = %self.name, actor = actor.name(), "permission denied");
            return true;
        }

        if let Some((first, rest)) = args.split_first() {
            let key = first.to_lowercase();
            if let Some(child) = self.children.get(&key) {
                return child.execute(host, actor, &key, rest);
            }
        }

        debug!(command = %self.name, label, args = ?args, "running command");
        self.run_handler(host, actor, args);
        true
    }

    fn run_handler(&self, host: &dyn Host, actor: &Actor, args: &[String]) {
        let result = if let Some(handler) = &self.user_handler {
            match actor {
                Actor::User(user) => {
                    let mut arguments = Arguments::new(args, host);
                    catch_fault(|| handler(user, &mut arguments))
                }
                Actor::Console => {
                    host.send_message(actor, USER_ONLY_NOTICE);
                    return;
                }
            }
        } else if let Some(handler) = &self.handler {
            let mut arguments = Arguments::new(args, host);
            catch_fault(|| handler(actor, &mut arguments))
        } else {
            return;
        };

        if let Err(error) = result {
            let message = format!("{:#}", error);
            warn!(
                command = %self.name,
                error = %message,
                "An error occurred while executing command"
            );
        }
    }

    /// Suggestions for the last of `args`
    ///
    /// `args` are the tokens after the label that selected this node; the
    /// last one is the partially typed word (possibly empty).
    pub fn complete(&self, host: &dyn Host, actor: &Actor, args: &[String]) -> Vec<String> {
        if let Some(completer) = &self.completer {
            match catch_fault(|| completer(actor, args)) {
                Ok(Some(completions)) => return completions,
                Ok(None) => {}
                Err(error) => {
                    let message = format!("{:#}", error);
                    warn!(
                        command = %self.name,
                        error = %message,
                        "An error occurred while tab-completing command"
                    );
                }
            }
        }

        match args {
            [] => Vec::new(),
            [partial] => {
                let partial = partial.to_lowercase();
                self.children
                    .iter()
                    .filter(|(name, child)| {
                        name.starts_with(&partial) && child.is_permitted(host, actor)
                    })
                    .map(|(name, _)| name.clone())
                    .collect()
            }
            [first, rest @ ..] => match self.children.get(&first.to_lowercase()) {
                Some(child) => child.complete(host, actor, rest),
                None => Vec::new(),
            },
        }
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("handler", &self.handler.is_some())
            .field("user_handler", &self.user_handler.is_some())
            .field("completer", &self.completer.is_some())
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Run a callback, turning a panic into an error
fn catch_fault<T>(f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
