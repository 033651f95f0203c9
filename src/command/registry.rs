//! Registration of root commands with the host's command table

use crate::command::actor::{Actor, Host};
use crate::command::node::CommandNode;
use std::collections::HashMap;
use tracing::debug;

/// The host's table of invocable root commands
pub trait CommandTable {
    /// Register `node` under its name and aliases, prefixed by `namespace`
    ///
    /// Returns `false` when the node's own name was already taken and only
    /// the namespaced label could be registered.
    fn register(&mut self, namespace: &str, node: CommandNode) -> bool;
}

/// Binds root command nodes into a [`CommandTable`] under one namespace
pub struct CommandRegistry<'t, T: CommandTable> {
    namespace: String,
    table: &'t mut T,
}

impl<'t, T: CommandTable> CommandRegistry<'t, T> {
    /// Create a registry; the namespace is lowercased
    pub fn new(namespace: &str, table: &'t mut T) -> Self {
        CommandRegistry {
            namespace: namespace.to_lowercase(),
            table,
        }
    }

    /// Register a single root command
    pub fn register_command(&mut self, node: CommandNode) -> bool {
        debug!(namespace = %self.namespace, command = node.name(), "registering command");
        self.table.register(&self.namespace, node)
    }

    /// The namespace commands are registered under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// In-memory command table
///
/// Every root is reachable as `namespace:name`. Its plain name and aliases
/// are claimed first come, first served; a later root never steals a label
/// from an earlier one.
#[derive(Debug, Default)]
pub struct CommandMap {
    roots: Vec<CommandNode>,
    labels: HashMap<String, usize>,
}

impl CommandMap {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered command, ahead of re-registering a rebuilt tree
    pub fn clear(&mut self) {
        self.roots.clear();
        self.labels.clear();
    }

    /// Root command reachable through `label`
    pub fn get(&self, label: &str) -> Option<&CommandNode> {
        self.labels
            .get(&label.to_lowercase())
            .map(|&index| &self.roots[index])
    }

    /// Registered root commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = &CommandNode> {
        self.roots.iter()
    }

    /// Every label that resolves to a root, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.labels.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Dispatch a whole line such as `pv givevote alice 5`
    ///
    /// Returns `false` only when the first word names no registered command;
    /// once a root is found the line always counts as handled.
    pub fn dispatch(&self, host: &dyn Host, actor: &Actor, line: &str) -> bool {
        let mut words = line.split_whitespace();
        let Some(label) = words.next() else {
            return false;
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        match self.get(label) {
            Some(root) => root.execute(host, actor, &label.to_lowercase(), &args),
            None => {
                debug!(label, "unknown command");
                false
            }
        }
    }

    /// Completions for the last word of a partially typed line
    ///
    /// A trailing space starts a new, empty word. While the label itself is
    /// being typed, labels of commands the actor may use are suggested;
    /// namespaced labels only once a `:` has been typed.
    pub fn complete(&self, host: &dyn Host, actor: &Actor, line: &str) -> Vec<String> {
        let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if line.is_empty() || line.ends_with(char::is_whitespace) {
            words.push(String::new());
        }

        match words.split_first() {
            Some((label, [])) => {
                let partial = label.to_lowercase();
                let mut labels: Vec<String> = self
                    .labels
                    .iter()
                    .filter(|&(name, &index)| {
                        name.starts_with(&partial)
                            && (!name.contains(':') || partial.contains(':'))
                            && self.roots[index].is_permitted(host, actor)
                    })
                    .map(|(name, _)| name.clone())
                    .collect();
                labels.sort_unstable();
                labels
            }
            Some((label, args)) => match self.get(label) {
                Some(root) if root.is_permitted(host, actor) => root.complete(host, actor, args),
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    fn claim(&mut self, label: String, index: usize) -> bool {
        if self.labels.contains_key(&label) {
            return false;
        }
        self.labels.insert(label, index);
        true
    }
}

impl CommandTable for CommandMap {
    fn register(&mut self, namespace: &str, node: CommandNode) -> bool {
        let index = self.roots.len();
        let name = node.name().to_string();

        self.labels.insert(format!("{}:{}", namespace, name), index);
        let registered = self.claim(name.clone(), index);
        if !registered {
            debug!(command = %name, "label already taken, only the namespaced label is registered");
        }

        for alias in node.aliases() {
            let alias = alias.to_lowercase();
            self.labels.insert(format!("{}:{}", namespace, alias), index);
            self.claim(alias, index);
        }

        self.roots.push(node);
        registered
    }
}
