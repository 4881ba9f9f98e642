//! Chat widget configuration.
//!
//! Every field has a default, so an absent or partial JSON document is
//! valid. The browser build reads the document from an optional
//! `<script id="chat-config" type="application/json">` element.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::chat::render::MarkupPolicy;
use crate::error::ChatError;
use crate::state::channel::Channel;
use crate::state::scroll::DEFAULT_BOTTOM_THRESHOLD;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 10_000;
pub const DEFAULT_SEND_REFRESH_DELAY_MS: u64 = 500;
pub const DEFAULT_SCROLL_SETTLE_MS: u64 = 2000;
pub const DEFAULT_TAB_LAYOUT_DELAY_MS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MESSAGES_ENDPOINT: &str = "/chat/get_messages/";
pub const DEFAULT_SEND_ENDPOINT: &str = "/chat/send_message/";
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Id of the optional inline JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "chat-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    pub poll_interval_ms: u64,
    pub retry_delay_ms: u64,
    pub send_refresh_delay_ms: u64,
    pub scroll_settle_ms: u64,
    pub tab_layout_delay_ms: u64,
    /// Upper bound on one HTTP request; expiry counts as a transport failure.
    pub request_timeout_ms: u64,
    pub bottom_threshold: f64,
    pub messages_endpoint: String,
    pub send_endpoint: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub initial_channel: Channel,
    pub markup: MarkupPolicy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            send_refresh_delay_ms: DEFAULT_SEND_REFRESH_DELAY_MS,
            scroll_settle_ms: DEFAULT_SCROLL_SETTLE_MS,
            tab_layout_delay_ms: DEFAULT_TAB_LAYOUT_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            bottom_threshold: DEFAULT_BOTTOM_THRESHOLD,
            messages_endpoint: DEFAULT_MESSAGES_ENDPOINT.to_owned(),
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            csrf_cookie: DEFAULT_CSRF_COOKIE.to_owned(),
            csrf_header: DEFAULT_CSRF_HEADER.to_owned(),
            initial_channel: Channel::World,
            markup: MarkupPolicy::Raw,
        }
    }
}

impl ChatConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] for malformed JSON, unknown fields, or
    /// values that would stall the widget (zero intervals, empty endpoints).
    pub fn from_json(raw: &str) -> Result<Self, ChatError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ChatError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ChatError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ChatError> {
        let delays = [
            ("poll_interval_ms", self.poll_interval_ms),
            ("retry_delay_ms", self.retry_delay_ms),
            ("scroll_settle_ms", self.scroll_settle_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ];
        for (name, value) in delays {
            if value == 0 {
                return Err(ChatError::Config(format!("{name} must be greater than zero")));
            }
        }
        if !self.bottom_threshold.is_finite() || self.bottom_threshold <= 0.0 {
            return Err(ChatError::Config(format!(
                "bottom_threshold must be a positive number, got {}",
                self.bottom_threshold
            )));
        }
        for (name, value) in [
            ("messages_endpoint", &self.messages_endpoint),
            ("send_endpoint", &self.send_endpoint),
            ("csrf_header", &self.csrf_header),
        ] {
            if value.trim().is_empty() {
                return Err(ChatError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn send_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.send_refresh_delay_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn tab_layout_delay(&self) -> Duration {
        Duration::from_millis(self.tab_layout_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
