#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use super::channel::Channel;

/// Highest rendered message id per channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorMap {
    last_ids: HashMap<Channel, u64>,
}

impl Default for CursorMap {
    fn default() -> Self {
        Self { last_ids: Channel::ALL.into_iter().map(|c| (c, 0)).collect() }
    }
}

impl CursorMap {
    pub fn get(&self, channel: Channel) -> u64 {
        self.last_ids.get(&channel).copied().unwrap_or(0)
    }

    /// Move a channel's cursor forward. A value at or below the current
    /// cursor is ignored, so a late response can never rewind the channel.
    pub fn advance(&mut self, channel: Channel, last_id: u64) -> bool {
        let current = self.last_ids.entry(channel).or_insert(0);
        if last_id <= *current {
            log::debug!("ignoring stale cursor {last_id} for {channel} (at {current})");
            return false;
        }
        *current = last_id;
        true
    }

    /// Zero every cursor. Only used when the session history is purged.
    pub fn reset(&mut self) {
        for value in self.last_ids.values_mut() {
            *value = 0;
        }
    }
}

/// Per-page chat session: which channel is shown and how far each channel
/// has been read.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    pub current: Channel,
    pub cursors: CursorMap,
}

impl ChatSession {
    pub fn new(current: Channel) -> Self {
        Self { current, cursors: CursorMap::default() }
    }

    /// Cursor of the channel currently shown.
    pub fn current_cursor(&self) -> u64 {
        self.cursors.get(self.current)
    }
}
