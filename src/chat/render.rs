//! Message rendering into channel containers.
//!
//! SECURITY
//! ========
//! [`MarkupPolicy::Raw`] (the default) inserts `sender` and `text` as markup,
//! exactly as the server sent them. Chat text can therefore inject HTML and
//! script into the page. Integrators who do not trust the server's markup
//! should configure `escaped` or `sanitized`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Deserialize;

use crate::net::types::ChatMessage;
use crate::state::channel::Channel;
use crate::state::scroll::{ScrollMetrics, ScrollPolicy};

/// Host UI surface the runtime drives.
///
/// The browser implementation lives in `components::chat_panel`; tests use
/// an in-memory double.
pub trait ChatView {
    /// Scroll geometry of a channel container, `None` when it is not mounted.
    fn container_metrics(&self, channel: Channel) -> Option<ScrollMetrics>;
    /// Append one line, given as markup, to a channel container.
    fn append_line(&mut self, channel: Channel, markup: &str);
    fn scroll_to_bottom(&mut self, channel: Channel);
    fn clear_container(&mut self, channel: Channel);
    fn set_tab_active(&mut self, channel: Channel, active: bool);
    fn set_container_visible(&mut self, channel: Channel, visible: bool);
    fn set_group_panel_visible(&mut self, visible: bool);
    fn input_text(&self) -> String;
    fn set_input_text(&mut self, text: &str);
    /// Blocking, user-facing error notice.
    fn alert(&mut self, message: &str);
}

/// How message fields are turned into markup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupPolicy {
    /// Insert server content verbatim.
    #[default]
    Raw,
    /// HTML-escape every field.
    Escaped,
    /// Keep safe formatting tags, strip scripts and event handlers.
    Sanitized,
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one message as a single `[time] sender: text` line.
pub fn format_line(msg: &ChatMessage, policy: MarkupPolicy) -> String {
    match policy {
        MarkupPolicy::Raw => format!("[{}] {}: {}", msg.time, msg.sender, msg.text),
        MarkupPolicy::Escaped => format!(
            "[{}] {}: {}",
            escape_html(&msg.time),
            escape_html(&msg.sender),
            escape_html(&msg.text)
        ),
        MarkupPolicy::Sanitized => {
            ammonia::clean(&format!("[{}] {}: {}", msg.time, msg.sender, msg.text))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    MissingContainer,
    Appended { count: usize, scrolled: bool },
}

/// Append `messages` to `channel` in order, then follow the new bottom only
/// if auto-scroll is on and the container was already at the bottom.
pub fn append_messages(
    view: &mut dyn ChatView,
    scroll: &ScrollPolicy,
    markup: MarkupPolicy,
    messages: &[ChatMessage],
    channel: Channel,
) -> AppendOutcome {
    let Some(before) = view.container_metrics(channel) else {
        log::warn!("no message container for channel {channel}; dropping {} messages", messages.len());
        return AppendOutcome::MissingContainer;
    };
    let was_at_bottom = scroll.is_at_bottom(&before);

    for msg in messages {
        view.append_line(channel, &format_line(msg, markup));
    }

    let scrolled = scroll.auto_scroll_enabled() && was_at_bottom;
    if scrolled {
        view.scroll_to_bottom(channel);
    }
    AppendOutcome::Appended { count: messages.len(), scrolled }
}
