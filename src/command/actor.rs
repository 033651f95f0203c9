//! Actors and the host services the dispatcher talks to
//!
//! The dispatcher never inspects an actor beyond its kind. Everything else
//! (permission checks, resolving user names, delivering feedback) goes
//! through the [`Host`] supplied by the embedding application.

use std::fmt;

/// A live connected user, the restricted actor kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    name: String,
}

impl User {
    /// Create a user handle
    pub fn new(name: impl Into<String>) -> Self {
        User { name: name.into() }
    }

    /// The user's display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The entity that invoked a command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The server console
    Console,
    /// A live connected user
    User(User),
}

impl Actor {
    /// Shorthand for `Actor::User(User::new(name))`
    pub fn user(name: impl Into<String>) -> Self {
        Actor::User(User::new(name))
    }

    /// The user behind this actor, if it is of the restricted kind
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Actor::User(user) => Some(user),
            Actor::Console => None,
        }
    }

    /// Name used in logs and messages
    pub fn name(&self) -> &str {
        match self {
            Actor::Console => "CONSOLE",
            Actor::User(user) => user.name(),
        }
    }
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Actor::User(user)
    }
}

/// Services provided by the process hosting the dispatcher
pub trait Host {
    /// Whether `actor` holds the authorization `permission`
    fn has_permission(&self, actor: &Actor, permission: &str) -> bool;

    /// Resolve a name to a live user, `None` when nobody by that name is connected
    fn lookup_user(&self, name: &str) -> Option<User>;

    /// Deliver a feedback line to `actor`
    fn send_message(&self, actor: &Actor, message: &str);
}
