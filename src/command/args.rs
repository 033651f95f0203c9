//! Typed access to the tokens left over after command resolution

use crate::command::actor::{Host, User};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Arguments handed to a command handler
///
/// Holds the tokens that follow the resolved command path, plus a scratch map
/// handlers can use to stash pre-parsed values. Every lookup is fail-soft:
/// a missing or malformed token comes back as `None`.
pub struct Arguments<'a> {
    tokens: &'a [String],
    host: &'a dyn Host,
    scratch: HashMap<String, Box<dyn Any>>,
}

impl<'a> Arguments<'a> {
    /// Wrap the remaining tokens at the current dispatch level
    pub fn new(tokens: &'a [String], host: &'a dyn Host) -> Self {
        Arguments {
            tokens,
            host,
            scratch: HashMap::new(),
        }
    }

    /// The host this dispatch runs in, for replying to actors
    pub fn host(&self) -> &'a dyn Host {
        self.host
    }

    /// Raw token at `index`, `None` if out of bounds
    pub fn raw(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// All remaining tokens
    pub fn raw_args(&self) -> &'a [String] {
        self.tokens
    }

    /// Number of remaining tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens remain
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index` parsed as a base-10 integer
    ///
    /// Missing and unparsable tokens both yield `None`; handlers treat
    /// either as a usage error.
    pub fn int(&self, index: usize) -> Option<i32> {
        self.raw(index).and_then(|value| value.parse().ok())
    }

    /// Token at `index` as a boolean
    ///
    /// Only a case-insensitive `true` is true. Any other present token is
    /// false, a missing one is `None`.
    pub fn boolean(&self, index: usize) -> Option<bool> {
        self.raw(index)
            .map(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Token at `index` resolved to a live user through the host directory
    pub fn user(&self, index: usize) -> Option<User> {
        self.raw(index).and_then(|name| self.host.lookup_user(name))
    }

    /// Token at `index` as a string, same as [`Arguments::raw`]
    pub fn string(&self, index: usize) -> Option<&'a str> {
        self.raw(index)
    }

    /// Stash a value in the scratch map
    pub fn put<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.scratch.insert(key.into(), Box::new(value));
    }

    /// Fetch a stashed value, `None` if absent or of another type
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.scratch.get(key).and_then(|value| value.downcast_ref())
    }
}

impl fmt::Debug for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("tokens", &self.tokens)
            .field("scratch_keys", &self.scratch.keys().collect::<Vec<_>>())
            .finish()
    }
}
