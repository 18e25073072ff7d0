use std::fmt;

use parking_lot::RwLock;

/// Holds the session token set by login and cleared by logout.
///
/// Access is synchronized, so concurrent login and logout calls never tear
/// the value; the last writer wins.
#[derive(Default)]
pub struct SessionStore {
    token: RwLock<Option<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the token, returning the previous one.
    pub fn clear(&self) -> Option<String> {
        self.token.write().take()
    }

    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").field("logged_in", &self.is_set()).finish()
    }
}
