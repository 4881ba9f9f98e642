//! # chat-panel
//!
//! Leptos + WASM multi-channel chat widget.
//!
//! The widget polls a messages endpoint per channel, renders new lines into
//! one scrollable container per tab while respecting manual scroll-back,
//! and posts outbound messages with the CSRF token read from cookies.
//! Behavior lives in a browser-free runtime (`chat`), so everything except
//! the DOM bindings in `components` runs under native tests.

pub mod app;
pub mod chat;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

#[cfg(feature = "csr")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "csr")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
