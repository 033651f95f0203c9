//! Console host
//!
//! Plays the part of the game server: permissions and online users come from
//! the configuration, and messages are printed to the terminal.

use crate::command::{Actor, Host, User};
use crate::message::colorize;
use crate::votes::Settings;
use colored::Colorize;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Permission that grants everything
const WILDCARD_PERMISSION: &str = "*";

/// Host backed by the configuration and a terminal
pub struct ConsoleHost {
    settings: Rc<RefCell<Settings>>,
    session: Actor,
    out: RefCell<Box<dyn Write>>,
}

impl ConsoleHost {
    /// Host printing to stdout for the actor driving this session
    pub fn new(settings: Rc<RefCell<Settings>>, session: Actor) -> Self {
        Self::with_output(settings, session, Box::new(io::stdout()))
    }

    /// Host printing to `out`
    pub fn with_output(
        settings: Rc<RefCell<Settings>>,
        session: Actor,
        out: Box<dyn Write>,
    ) -> Self {
        ConsoleHost {
            settings,
            session,
            out: RefCell::new(out),
        }
    }

    /// The actor typing commands in this session
    pub fn session(&self) -> &Actor {
        &self.session
    }

    /// Print a line that is not addressed to anyone in particular
    pub fn print_line(&self, line: &str) {
        let mut out = self.out.borrow_mut();
        // Write errors on the terminal are not actionable
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

impl Host for ConsoleHost {
    fn has_permission(&self, actor: &Actor, permission: &str) -> bool {
        match actor {
            Actor::Console => true,
            Actor::User(user) => self
                .settings
                .borrow()
                .config
                .user(user.name())
                .map(|(_, entry)| {
                    entry
                        .permissions
                        .iter()
                        .any(|granted| granted == permission || granted == WILDCARD_PERMISSION)
                })
                .unwrap_or(false),
        }
    }

    fn lookup_user(&self, name: &str) -> Option<User> {
        let settings = self.settings.borrow();
        match settings.config.user(name) {
            Some((canonical, entry)) if entry.online => Some(User::new(canonical)),
            _ => None,
        }
    }

    fn send_message(&self, actor: &Actor, message: &str) {
        let rendered = colorize(message);
        if *actor == self.session {
            self.print_line(&rendered);
        } else {
            self.print_line(&format!("{} {}", format!("[to {}]", actor.name()).dimmed(), rendered));
        }
    }
}
