//! Channel tab switching.

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

use super::poll::PollLoop;
use super::render::ChatView;
use crate::net::types::FetchRequest;
use crate::state::channel::Channel;
use crate::state::scroll::ScrollPolicy;
use crate::state::session::ChatSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabSwitch {
    /// The target container exists and was shown; a layout pass should
    /// follow before scrolling it.
    pub shown: bool,
    /// Immediate fetch for the new channel, if the loop allows one.
    pub request: Option<FetchRequest>,
}

/// Make `target` the active channel: flip tab indicators and container
/// visibility, toggle the group panel, and issue an immediate fetch.
pub fn switch_to(
    view: &mut dyn ChatView,
    session: &mut ChatSession,
    poll: &mut PollLoop,
    target: Channel,
) -> TabSwitch {
    for channel in Channel::ALL {
        view.set_tab_active(channel, channel == target);
        view.set_container_visible(channel, channel == target);
    }
    let shown = view.container_metrics(target).is_some();

    session.current = target;
    let request = poll.begin_fetch(session);

    view.set_group_panel_visible(target.shows_group_panel());

    TabSwitch { shown, request }
}

/// Runs once the newly shown container has been laid out.
pub fn settle_layout(view: &mut dyn ChatView, scroll: &ScrollPolicy, channel: Channel) -> bool {
    if !scroll.auto_scroll_enabled() || view.container_metrics(channel).is_none() {
        return false;
    }
    view.scroll_to_bottom(channel);
    true
}
