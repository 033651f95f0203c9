//! Common test utilities

#![allow(dead_code)]

use cmdtree::{Actor, Host, User};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a cmdtree.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cmdtree.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config in a directory and return a subdirectory below it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cmdtree.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&config_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

/// Host that records every message it is asked to send
#[derive(Default)]
pub struct RecordingHost {
    permissions: HashMap<String, HashSet<String>>,
    online: Vec<String>,
    sent: RefCell<Vec<(String, String)>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as online
    pub fn with_user(mut self, name: &str) -> Self {
        self.online.push(name.to_string());
        self
    }

    /// Grant `permission` to the user `name`
    pub fn grant(mut self, name: &str, permission: &str) -> Self {
        self.permissions
            .entry(name.to_lowercase())
            .or_default()
            .insert(permission.to_string());
        self
    }

    /// Messages sent to the actor named `name`
    pub fn messages_to(&self, name: &str) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|(to, _)| to == name)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Every message sent so far
    pub fn all_messages(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Host for RecordingHost {
    fn has_permission(&self, actor: &Actor, permission: &str) -> bool {
        match actor {
            Actor::Console => true,
            Actor::User(user) => self
                .permissions
                .get(&user.name().to_lowercase())
                .map(|granted| granted.contains(permission))
                .unwrap_or(false),
        }
    }

    fn lookup_user(&self, name: &str) -> Option<User> {
        self.online
            .iter()
            .find(|online| online.eq_ignore_ascii_case(name))
            .map(User::new)
    }

    fn send_message(&self, actor: &Actor, message: &str) {
        self.sent
            .borrow_mut()
            .push((actor.name().to_string(), message.to_string()));
    }
}

/// Split a line into owned tokens
pub fn tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
