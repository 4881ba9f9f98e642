//! Outbound message composer.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use super::render::ChatView;
use crate::error::ChatError;
use crate::net::types::{ResponseStatus, SendRequest, SendResponse, server_error_text};
use crate::state::session::ChatSession;

pub const SEND_FAILED_ALERT: &str = "Failed to send message";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Accepted; the input was cleared.
    Sent,
    /// Server answered with a non-`ok` status.
    Rejected(String),
    /// Request never got a usable answer.
    Failed,
}

/// Enter without Shift submits; Shift+Enter is left to the input.
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// Build the request for the current input, or `None` if it is blank.
pub fn prepare_send(view: &dyn ChatView, session: &ChatSession) -> Option<SendRequest> {
    let input = view.input_text();
    let text = input.trim();
    if text.is_empty() {
        return None;
    }
    Some(SendRequest { tab: session.current, text: text.to_owned() })
}

/// Apply the server's answer. The input is only cleared on success; every
/// failure is surfaced with an alert and leaves the text for another try.
pub fn complete_send(view: &mut dyn ChatView, result: Result<SendResponse, ChatError>) -> SendOutcome {
    match result {
        Ok(resp) if resp.status == ResponseStatus::Ok => {
            view.set_input_text("");
            SendOutcome::Sent
        }
        Ok(resp) => {
            let error = server_error_text(resp.error.as_deref());
            view.alert(&format!("{SEND_FAILED_ALERT}: {error}"));
            SendOutcome::Rejected(error)
        }
        Err(err) => {
            log::error!("failed to send message: {err}");
            view.alert(SEND_FAILED_ALERT);
            SendOutcome::Failed
        }
    }
}

pub fn clear_input(view: &mut dyn ChatView) {
    view.set_input_text("");
}
