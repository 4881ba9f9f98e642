//! Poll loop: request bookkeeping and response interpretation.
//!
//! The loop never touches timers or the network itself. The runtime asks it
//! for the next [`FetchRequest`] and hands back the result; the browser
//! driver does the I/O.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::collections::HashSet;
use std::time::Duration;

use crate::error::ChatError;
use crate::net::types::{ChatMessage, FetchRequest, FetchResponse, ResponseStatus, server_error_text};
use crate::state::channel::Channel;
use crate::state::session::ChatSession;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PollStatus {
    #[default]
    Active,
    Stopped,
}

/// Result of applying one fetch response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New messages for `channel`; its cursor has already been advanced.
    Messages { channel: Channel, messages: Vec<ChatMessage> },
    /// Nothing new.
    Empty,
    /// Server answered with a non-`ok` status. The regular tick retries.
    ServerError(String),
    /// Transport failure; fetch again once after the delay.
    RetryAfter(Duration),
    /// Transport failure after the loop was stopped; nothing is scheduled.
    Dropped,
}

#[derive(Clone, Debug)]
pub struct PollLoop {
    status: PollStatus,
    interval: Duration,
    retry_delay: Duration,
    in_flight: HashSet<Channel>,
}

impl PollLoop {
    pub fn new(interval: Duration, retry_delay: Duration) -> Self {
        Self { status: PollStatus::Active, interval, retry_delay, in_flight: HashSet::new() }
    }

    pub fn status(&self) -> PollStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == PollStatus::Active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_in_flight(&self, channel: Channel) -> bool {
        self.in_flight.contains(&channel)
    }

    /// Mark the loop active and return the period for the repeating timer.
    pub fn start(&mut self) -> Duration {
        self.status = PollStatus::Active;
        self.interval
    }

    pub fn stop(&mut self) {
        self.status = PollStatus::Stopped;
    }

    /// Build the next request for the current channel.
    ///
    /// Returns `None` when the loop is stopped or that channel already has a
    /// request outstanding; the outstanding one will deliver its messages.
    pub fn begin_fetch(&mut self, session: &ChatSession) -> Option<FetchRequest> {
        if !self.is_active() {
            return None;
        }
        let channel = session.current;
        if !self.in_flight.insert(channel) {
            log::debug!("fetch for {channel} already in flight; skipping");
            return None;
        }
        Some(FetchRequest { channel, last_id: session.cursors.get(channel) })
    }

    /// Apply the result of a request issued by [`Self::begin_fetch`].
    ///
    /// Only transport-class errors ([`ChatError::is_transport`]) earn the
    /// delayed retry; anything else is logged and left to the next tick.
    /// Results are applied even after [`Self::stop`]; only the retry is
    /// suppressed then.
    pub fn complete_fetch(
        &mut self,
        session: &mut ChatSession,
        request: FetchRequest,
        result: Result<FetchResponse, ChatError>,
    ) -> FetchOutcome {
        self.in_flight.remove(&request.channel);

        let response = match result {
            Ok(response) => response,
            Err(err) if err.is_transport() => {
                log::error!("failed to fetch {} messages: {err}", request.channel);
                if self.is_active() {
                    return FetchOutcome::RetryAfter(self.retry_delay);
                }
                return FetchOutcome::Dropped;
            }
            Err(err) => return server_error(request.channel, err),
        };

        if response.status != ResponseStatus::Ok {
            let error = server_error_text(response.error.as_deref());
            return server_error(request.channel, ChatError::Server(error));
        }

        let messages = response.messages.unwrap_or_default();
        if messages.is_empty() {
            return FetchOutcome::Empty;
        }

        let Some(last_id) = response.last_id else {
            let err = ChatError::Server("response carried messages without last_id".to_owned());
            return server_error(request.channel, err);
        };
        session.cursors.advance(request.channel, last_id);

        FetchOutcome::Messages { channel: request.channel, messages }
    }
}

fn server_error(channel: Channel, err: ChatError) -> FetchOutcome {
    log::error!("server error fetching {channel} messages: {err}");
    match err {
        ChatError::Server(text) => FetchOutcome::ServerError(text),
        other => FetchOutcome::ServerError(other.to_string()),
    }
}
