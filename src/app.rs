//! Root application component.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::config::ChatConfig;
#[cfg(feature = "csr")]
use crate::config::CONFIG_ELEMENT_ID;

/// Reads the embedded configuration block, falling back to defaults when it
/// is absent or invalid.
pub fn load_config() -> ChatConfig {
    match config_source() {
        Some(json) => ChatConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("invalid chat config, using defaults: {e}");
            ChatConfig::default()
        }),
        None => ChatConfig::default(),
    }
}

#[cfg(feature = "csr")]
fn config_source() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

#[cfg(not(feature = "csr"))]
fn config_source() -> Option<String> {
    None
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log::info!("chat panel starting on channel {}", config.initial_channel);

    view! { <ChatPanel config=config/> }
}
