//! Host-independent chat runtime.
//!
//! `ChatRuntime` owns the session, poll loop, scroll policy and view. Every
//! UI, timer and network event goes in as a method call; everything that
//! needs the outside world comes back as an [`Effect`] for the host driver
//! to perform.
//!
//! TIMERS
//! ======
//! The host keeps one handle per [`TimerSlot`] plus the poll interval.
//! Scheduling a slot replaces (and cancels) whatever was pending in it, so
//! the 10 s transport retry and the post-send refresh never stack up.

#[cfg(test)]
#[path = "runtime_test.rs"]
mod runtime_test;

use std::time::Duration;

use super::composer::{self, SendOutcome};
use super::poll::{FetchOutcome, PollLoop};
use super::render::{self, ChatView};
use super::tabs;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::net::types::{FetchRequest, FetchResponse, SendRequest, SendResponse};
use crate::state::channel::Channel;
use crate::state::history::{self, SessionStore};
use crate::state::scroll::{ScrollPolicy, ScrollReaction};
use crate::state::session::ChatSession;

/// One-shot timers owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Out-of-band fetch: transport retry or post-send refresh.
    FollowUp,
    /// Manual-scroll settle check.
    ScrollSettle,
    /// Scroll a freshly shown container once it has been laid out.
    TabLayout,
}

/// Work the host must carry out on the runtime's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    Send(SendRequest),
    /// Replace the repeating poll timer.
    StartInterval(Duration),
    StopInterval,
    Schedule(TimerSlot, Duration),
}

pub struct ChatRuntime<V> {
    config: ChatConfig,
    session: ChatSession,
    poll: PollLoop,
    scroll: ScrollPolicy,
    view: V,
    settle_target: Option<Channel>,
    layout_target: Option<Channel>,
}

impl<V: ChatView> ChatRuntime<V> {
    pub fn new(config: ChatConfig, view: V) -> Self {
        let session = ChatSession::new(config.initial_channel);
        let poll = PollLoop::new(config.poll_interval(), config.retry_delay());
        let scroll = ScrollPolicy::new(config.bottom_threshold);
        Self { config, session, poll, scroll, view, settle_target: None, layout_target: None }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn poll(&self) -> &PollLoop {
        &self.poll
    }

    pub fn scroll(&self) -> &ScrollPolicy {
        &self.scroll
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Page-load sequence: purge history once per session, show the initial
    /// channel, and start polling.
    pub fn boot(&mut self, store: &mut dyn SessionStore) -> Vec<Effect> {
        self.reset_history(store);
        let mut effects = self.switch_tab(self.session.current);
        effects.extend(self.start());
        effects
    }

    /// Purge containers and cursors unless this session already did.
    ///
    /// On a freshly mounted panel the containers are empty and the cursors
    /// are zero, so the only observable change is the session flag. The
    /// purge matters when the runtime already holds history, e.g. after the
    /// flag was removed by an unload that did not tear the page down.
    pub fn reset_history(&mut self, store: &mut dyn SessionStore) -> bool {
        if !history::needs_history_reset(store) {
            return false;
        }
        for channel in Channel::ALL {
            self.view.clear_container(channel);
        }
        self.session.cursors.reset();
        history::mark_history_cleared(store);
        log::info!("local chat history cleared");
        true
    }

    /// Cancel the interval, fetch once, re-arm the interval.
    pub fn start(&mut self) -> Vec<Effect> {
        let interval = self.poll.start();
        let mut effects = vec![Effect::StopInterval];
        effects.extend(self.fetch_now());
        effects.push(Effect::StartInterval(interval));
        effects
    }

    pub fn stop(&mut self) -> Vec<Effect> {
        self.poll.stop();
        vec![Effect::StopInterval]
    }

    /// Interval tick, follow-up timer, or any explicit refresh.
    pub fn fetch_now(&mut self) -> Vec<Effect> {
        self.poll.begin_fetch(&self.session).map(Effect::Fetch).into_iter().collect()
    }

    pub fn fetch_completed(
        &mut self,
        request: FetchRequest,
        result: Result<FetchResponse, ChatError>,
    ) -> Vec<Effect> {
        match self.poll.complete_fetch(&mut self.session, request, result) {
            FetchOutcome::Messages { channel, messages } => {
                render::append_messages(&mut self.view, &self.scroll, self.config.markup, &messages, channel);
                Vec::new()
            }
            FetchOutcome::RetryAfter(delay) => vec![Effect::Schedule(TimerSlot::FollowUp, delay)],
            FetchOutcome::Empty | FetchOutcome::ServerError(_) | FetchOutcome::Dropped => Vec::new(),
        }
    }

    pub fn switch_tab(&mut self, channel: Channel) -> Vec<Effect> {
        let switch = tabs::switch_to(&mut self.view, &mut self.session, &mut self.poll, channel);
        let mut effects = Vec::new();
        if switch.shown {
            self.layout_target = Some(channel);
            effects.push(Effect::Schedule(TimerSlot::TabLayout, self.config.tab_layout_delay()));
        }
        effects.extend(switch.request.map(Effect::Fetch));
        effects
    }

    /// User scrolled a channel container.
    pub fn scrolled(&mut self, channel: Channel) -> Vec<Effect> {
        let Some(metrics) = self.view.container_metrics(channel) else {
            return Vec::new();
        };
        match self.scroll.on_scroll(&metrics) {
            ScrollReaction::ArmSettle => {
                self.settle_target = Some(channel);
                vec![Effect::Schedule(TimerSlot::ScrollSettle, self.config.scroll_settle())]
            }
            ScrollReaction::Resumed | ScrollReaction::Unchanged => Vec::new(),
        }
    }

    pub fn timer_fired(&mut self, slot: TimerSlot) -> Vec<Effect> {
        match slot {
            TimerSlot::FollowUp => self.fetch_now(),
            TimerSlot::ScrollSettle => {
                if let Some(channel) = self.settle_target.take() {
                    if let Some(metrics) = self.view.container_metrics(channel) {
                        self.scroll.on_settle(&metrics);
                    }
                }
                Vec::new()
            }
            TimerSlot::TabLayout => {
                if let Some(channel) = self.layout_target.take() {
                    tabs::settle_layout(&mut self.view, &self.scroll, channel);
                }
                Vec::new()
            }
        }
    }

    /// Send button or Enter in the input.
    pub fn submit(&mut self) -> Vec<Effect> {
        composer::prepare_send(&self.view, &self.session).map(Effect::Send).into_iter().collect()
    }

    pub fn send_completed(&mut self, result: Result<SendResponse, ChatError>) -> Vec<Effect> {
        match composer::complete_send(&mut self.view, result) {
            SendOutcome::Sent => vec![Effect::Schedule(TimerSlot::FollowUp, self.config.send_refresh_delay())],
            SendOutcome::Rejected(_) | SendOutcome::Failed => Vec::new(),
        }
    }

    pub fn clear_input(&mut self) {
        composer::clear_input(&mut self.view);
    }
}
