//! Per-user cache of loaded lists

use medlog_store::normalize_user;
use std::collections::HashMap;
use tracing::debug;

/// Maps a user id to that user's in-memory list.
///
/// Keys are normalized user ids. A list is loaded on first access and stays
/// until [`SessionStore::invalidate`] or a forced [`SessionStore::load`].
#[derive(Debug)]
pub struct SessionStore<T> {
    lists: HashMap<String, T>,
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            lists: HashMap::new(),
        }
    }

    /// Cached list for `user`, calling `loader` only on a miss
    pub fn get_or_load<F>(&mut self, user: &str, loader: F) -> &mut T
    where
        F: FnOnce(&str) -> T,
    {
        let key = normalize_user(user);
        self.lists.entry(key).or_insert_with_key(|k| {
            debug!(user = %k, "loading session list");
            loader(k)
        })
    }

    /// Replace whatever is cached with a fresh load
    pub fn load<F>(&mut self, user: &str, loader: F) -> &mut T
    where
        F: FnOnce(&str) -> T,
    {
        self.invalidate(user);
        self.get_or_load(user, loader)
    }

    /// Returns true when something was cached
    pub fn invalidate(&mut self, user: &str) -> bool {
        self.lists.remove(&normalize_user(user)).is_some()
    }
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
