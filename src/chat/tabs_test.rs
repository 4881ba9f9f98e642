use std::time::Duration;

use super::*;
use crate::test_support::FakeView;

fn poll_loop() -> PollLoop {
    PollLoop::new(Duration::from_millis(3000), Duration::from_millis(10_000))
}

// =============================================================
// switch_to
// =============================================================

#[test]
fn switch_to_activates_only_target() {
    let mut view = FakeView::default();
    let mut session = ChatSession::default();
    let mut poll = poll_loop();

    switch_to(&mut view, &mut session, &mut poll, Channel::Trade);

    for channel in Channel::ALL {
        let c = view.container(channel);
        assert_eq!(c.tab_active, channel == Channel::Trade, "{channel}");
        assert_eq!(c.visible, channel == Channel::Trade, "{channel}");
    }
}

#[test]
fn switch_to_updates_current_and_fetches_immediately() {
    let mut view = FakeView::default();
    let mut session = ChatSession::default();
    session.cursors.advance(Channel::Private, 12);
    let mut poll = poll_loop();

    let switch = switch_to(&mut view, &mut session, &mut poll, Channel::Private);

    assert_eq!(session.current, Channel::Private);
    assert!(switch.shown);
    assert_eq!(switch.request, Some(FetchRequest { channel: Channel::Private, last_id: 12 }));
}

#[test]
fn switch_to_while_stopped_issues_no_fetch() {
    let mut view = FakeView::default();
    let mut session = ChatSession::default();
    let mut poll = poll_loop();
    poll.stop();

    let switch = switch_to(&mut view, &mut session, &mut poll, Channel::Clan);

    assert_eq!(session.current, Channel::Clan);
    assert!(switch.request.is_none());
}

#[test]
fn group_panel_visible_only_on_group_channel() {
    let mut view = FakeView::default();
    let mut session = ChatSession::default();
    let mut poll = poll_loop();

    switch_to(&mut view, &mut session, &mut poll, Channel::Group);
    assert!(view.group_panel_visible);

    switch_to(&mut view, &mut session, &mut poll, Channel::Groupchat);
    assert!(!view.group_panel_visible);
}

#[test]
fn switch_to_missing_container_still_switches_channel() {
    let mut view = FakeView::without(&[Channel::Alliance]);
    let mut session = ChatSession::default();
    let mut poll = poll_loop();

    let switch = switch_to(&mut view, &mut session, &mut poll, Channel::Alliance);

    assert!(!switch.shown);
    assert_eq!(session.current, Channel::Alliance);
    assert!(switch.request.is_some());
    assert!(view.containers.values().all(|c| !c.visible));
}

// =============================================================
// settle_layout
// =============================================================

#[test]
fn settle_layout_scrolls_when_auto_enabled() {
    let mut view = FakeView::default();
    view.fill(Channel::World, 40);
    let scroll = ScrollPolicy::default();

    assert!(settle_layout(&mut view, &scroll, Channel::World));
    assert!(scroll.is_at_bottom(&view.container(Channel::World).metrics()));
}

#[test]
fn settle_layout_respects_manual_override() {
    let mut view = FakeView::default();
    view.fill(Channel::World, 40);
    let mut scroll = ScrollPolicy::default();
    scroll.on_scroll(&view.container(Channel::World).metrics());

    assert!(!settle_layout(&mut view, &scroll, Channel::World));
    assert_eq!(view.container(Channel::World).scroll_to_bottom_calls, 0);
}
