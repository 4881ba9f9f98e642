//! Wire types for the chat HTTP endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::channel::Channel;

/// `status` field carried by every chat endpoint response.
///
/// A missing or unrecognised status is `Unknown` and treated like `error`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One chat line as produced by the server.
///
/// Fields are display-ready strings; `sender` and `text` may contain markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub time: String,
    pub sender: String,
    pub text: String,
}

/// Query for `GET /chat/get_messages/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub channel: Channel,
    pub last_id: u64,
}

impl FetchRequest {
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("tab", self.channel.as_str().to_owned()), ("last_id", self.last_id.to_string())]
    }
}

/// Body of `GET /chat/get_messages/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub last_id: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /chat/send_message/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub tab: Channel,
    pub text: String,
}

/// Response of `POST /chat/send_message/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default)]
    pub error: Option<String>,
}

/// Server-reported error text, or a placeholder when the server sent none.
pub fn server_error_text(error: Option<&str>) -> String {
    error.unwrap_or("unknown error").to_owned()
}
