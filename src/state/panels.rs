//! Collapsible side panels around the chat.

#[cfg(test)]
#[path = "panels_test.rs"]
mod panels_test;

/// The "System" panel under the chat, collapsed on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemPanel {
    pub expanded: bool,
}

impl SystemPanel {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Toggle button caption; the arrow points the way the panel will move.
    pub fn caption(self) -> &'static str {
        if self.expanded { "System ▲" } else { "System ▼" }
    }
}
