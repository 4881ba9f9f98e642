//! Test doubles for the host view and session storage.

use std::collections::{HashMap, HashSet};

use crate::chat::render::ChatView;
use crate::net::types::ChatMessage;
use crate::state::channel::Channel;
use crate::state::history::SessionStore;
use crate::state::scroll::ScrollMetrics;

pub const LINE_HEIGHT: f64 = 20.0;
pub const CLIENT_HEIGHT: f64 = 300.0;

#[derive(Clone, Debug)]
pub struct FakeContainer {
    pub lines: Vec<String>,
    pub scroll_top: f64,
    pub visible: bool,
    pub tab_active: bool,
    pub scroll_to_bottom_calls: usize,
}

impl FakeContainer {
    fn new() -> Self {
        Self { lines: Vec::new(), scroll_top: 0.0, visible: false, tab_active: false, scroll_to_bottom_calls: 0 }
    }

    pub fn scroll_height(&self) -> f64 {
        (self.lines.len() as f64 * LINE_HEIGHT).max(CLIENT_HEIGHT)
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics { scroll_height: self.scroll_height(), scroll_top: self.scroll_top, client_height: CLIENT_HEIGHT }
    }
}

/// In-memory [`ChatView`] whose containers grow by [`LINE_HEIGHT`] per line.
#[derive(Clone, Debug)]
pub struct FakeView {
    pub containers: HashMap<Channel, FakeContainer>,
    pub group_panel_visible: bool,
    pub input: String,
    pub alerts: Vec<String>,
}

impl Default for FakeView {
    fn default() -> Self {
        Self {
            containers: Channel::ALL.into_iter().map(|c| (c, FakeContainer::new())).collect(),
            group_panel_visible: false,
            input: String::new(),
            alerts: Vec::new(),
        }
    }
}

impl FakeView {
    pub fn without(channels: &[Channel]) -> Self {
        let missing: HashSet<_> = channels.iter().copied().collect();
        let mut view = Self::default();
        view.containers.retain(|c, _| !missing.contains(c));
        view
    }

    pub fn container(&self, channel: Channel) -> &FakeContainer {
        &self.containers[&channel]
    }

    pub fn container_mut(&mut self, channel: Channel) -> &mut FakeContainer {
        self.containers.get_mut(&channel).expect("container exists")
    }

    pub fn lines(&self, channel: Channel) -> Vec<String> {
        self.container(channel).lines.clone()
    }

    /// Fill a container with `n` lines and park it at the top.
    pub fn fill(&mut self, channel: Channel, n: usize) {
        let c = self.container_mut(channel);
        c.lines = (0..n).map(|i| format!("old {i}")).collect();
        c.scroll_top = 0.0;
    }

    /// Simulate the user dragging the scrollbar.
    pub fn scroll_to(&mut self, channel: Channel, top: f64) {
        self.container_mut(channel).scroll_top = top;
    }

    pub fn park_at_bottom(&mut self, channel: Channel) {
        let c = self.container_mut(channel);
        c.scroll_top = c.scroll_height() - CLIENT_HEIGHT;
    }
}

impl ChatView for FakeView {
    fn container_metrics(&self, channel: Channel) -> Option<ScrollMetrics> {
        self.containers.get(&channel).map(FakeContainer::metrics)
    }

    fn append_line(&mut self, channel: Channel, markup: &str) {
        if let Some(c) = self.containers.get_mut(&channel) {
            c.lines.push(markup.to_owned());
        }
    }

    fn scroll_to_bottom(&mut self, channel: Channel) {
        if let Some(c) = self.containers.get_mut(&channel) {
            c.scroll_top = c.scroll_height() - CLIENT_HEIGHT;
            c.scroll_to_bottom_calls += 1;
        }
    }

    fn clear_container(&mut self, channel: Channel) {
        if let Some(c) = self.containers.get_mut(&channel) {
            c.lines.clear();
            c.scroll_top = 0.0;
        }
    }

    fn set_tab_active(&mut self, channel: Channel, active: bool) {
        if let Some(c) = self.containers.get_mut(&channel) {
            c.tab_active = active;
        }
    }

    fn set_container_visible(&mut self, channel: Channel, visible: bool) {
        if let Some(c) = self.containers.get_mut(&channel) {
            c.visible = visible;
        }
    }

    fn set_group_panel_visible(&mut self, visible: bool) {
        self.group_panel_visible = visible;
    }

    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        text.clone_into(&mut self.input);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub items: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

pub fn message(time: &str, sender: &str, text: &str) -> ChatMessage {
    ChatMessage { time: time.to_owned(), sender: sender.to_owned(), text: text.to_owned() }
}
