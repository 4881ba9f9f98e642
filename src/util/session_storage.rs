//! `sessionStorage` adapter for the history-reset flag.
//!
//! Storage failures (private mode, disabled storage) are swallowed: the
//! widget then simply purges its history on every load.

use crate::state::history::SessionStore;

/// Session store backed by `window.sessionStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStore;

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&mut self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
