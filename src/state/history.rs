#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

/// Session-storage key marking that the local history was purged.
pub const HISTORY_CLEARED_KEY: &str = "chat_history_cleared";

/// Key/value store that lives as long as the browser tab session.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Whether this session still needs its one-time history purge.
pub fn needs_history_reset(store: &dyn SessionStore) -> bool {
    store.get(HISTORY_CLEARED_KEY).is_none()
}

pub fn mark_history_cleared(store: &mut dyn SessionStore) {
    store.set(HISTORY_CLEARED_KEY, "true");
}

/// Drop the flag so the next page load starts from a clean history.
pub fn forget_history_cleared(store: &mut dyn SessionStore) {
    store.remove(HISTORY_CLEARED_KEY);
}
