use super::*;
use crate::test_support::message;

fn poll_loop() -> PollLoop {
    PollLoop::new(Duration::from_millis(3000), Duration::from_millis(10_000))
}

fn ok_response(messages: Vec<ChatMessage>, last_id: u64) -> FetchResponse {
    FetchResponse { status: ResponseStatus::Ok, messages: Some(messages), last_id: Some(last_id), error: None }
}

// =============================================================
// begin_fetch
// =============================================================

#[test]
fn new_loop_is_active() {
    assert_eq!(poll_loop().status(), PollStatus::Active);
}

#[test]
fn begin_fetch_carries_current_channel_and_cursor() {
    let mut poll = poll_loop();
    let mut session = ChatSession::new(Channel::Location);
    session.cursors.advance(Channel::Location, 5);

    let req = poll.begin_fetch(&session).unwrap();

    assert_eq!(req, FetchRequest { channel: Channel::Location, last_id: 5 });
    assert!(poll.is_in_flight(Channel::Location));
}

#[test]
fn begin_fetch_is_noop_when_stopped() {
    let mut poll = poll_loop();
    poll.stop();
    assert!(poll.begin_fetch(&ChatSession::default()).is_none());
}

#[test]
fn begin_fetch_skips_channel_already_in_flight() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    assert!(poll.begin_fetch(&session).is_some());
    assert!(poll.begin_fetch(&session).is_none());

    session.current = Channel::Trade;
    assert!(poll.begin_fetch(&session).is_some());
}

#[test]
fn start_reactivates_and_returns_interval() {
    let mut poll = poll_loop();
    poll.stop();
    assert_eq!(poll.start(), Duration::from_millis(3000));
    assert!(poll.is_active());
}

// =============================================================
// complete_fetch
// =============================================================

#[test]
fn ok_batch_advances_cursor_and_returns_messages_in_order() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    session.cursors.advance(Channel::World, 5);
    let req = poll.begin_fetch(&session).unwrap();

    let batch = vec![message("1", "a", "one"), message("2", "b", "two")];
    let outcome = poll.complete_fetch(&mut session, req, Ok(ok_response(batch.clone(), 7)));

    assert_eq!(outcome, FetchOutcome::Messages { channel: Channel::World, messages: batch });
    assert_eq!(session.cursors.get(Channel::World), 7);
    assert!(!poll.is_in_flight(Channel::World));
}

#[test]
fn response_applies_to_requested_channel_after_tab_switch() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    session.current = Channel::Clan;

    let outcome = poll.complete_fetch(&mut session, req, Ok(ok_response(vec![message("t", "s", "x")], 3)));

    assert!(matches!(outcome, FetchOutcome::Messages { channel: Channel::World, .. }));
    assert_eq!(session.cursors.get(Channel::World), 3);
    assert_eq!(session.cursors.get(Channel::Clan), 0);
}

#[test]
fn empty_or_absent_list_changes_nothing() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    session.cursors.advance(Channel::World, 2);

    let req = poll.begin_fetch(&session).unwrap();
    let outcome = poll.complete_fetch(&mut session, req, Ok(ok_response(Vec::new(), 9)));
    assert_eq!(outcome, FetchOutcome::Empty);

    let req = poll.begin_fetch(&session).unwrap();
    let absent = FetchResponse { status: ResponseStatus::Ok, messages: None, last_id: None, error: None };
    assert_eq!(poll.complete_fetch(&mut session, req, Ok(absent)), FetchOutcome::Empty);

    assert_eq!(session.cursors.get(Channel::World), 2);
}

#[test]
fn server_error_is_reported_without_retry() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    let resp = FetchResponse {
        status: ResponseStatus::Error,
        messages: None,
        last_id: None,
        error: Some("not authenticated".to_owned()),
    };

    let outcome = poll.complete_fetch(&mut session, req, Ok(resp));

    assert_eq!(outcome, FetchOutcome::ServerError("not authenticated".to_owned()));
}

#[test]
fn body_without_status_is_a_server_error_without_retry() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    let resp: FetchResponse = serde_json::from_str(r#"{"error":"x"}"#).unwrap();

    let outcome = poll.complete_fetch(&mut session, req, Ok(resp));

    assert_eq!(outcome, FetchOutcome::ServerError("x".to_owned()));
}

#[test]
fn messages_without_last_id_are_rejected() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    let resp = FetchResponse {
        status: ResponseStatus::Ok,
        messages: Some(vec![message("t", "s", "x")]),
        last_id: None,
        error: None,
    };

    assert!(matches!(poll.complete_fetch(&mut session, req, Ok(resp)), FetchOutcome::ServerError(_)));
    assert_eq!(session.cursors.get(Channel::World), 0);
}

#[test]
fn transport_failure_schedules_one_retry() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();

    let outcome = poll.complete_fetch(&mut session, req, Err(ChatError::HttpStatus(500)));

    assert_eq!(outcome, FetchOutcome::RetryAfter(Duration::from_millis(10_000)));
    assert!(!poll.is_in_flight(Channel::World));
}

#[test]
fn non_transport_error_is_reported_without_retry() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();

    let outcome = poll.complete_fetch(&mut session, req, Err(ChatError::Server("flood".to_owned())));

    assert_eq!(outcome, FetchOutcome::ServerError("flood".to_owned()));
    assert!(!poll.is_in_flight(Channel::World));
    assert!(poll.begin_fetch(&session).is_some());
}

#[test]
fn expired_request_releases_channel_for_next_tick() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    assert!(poll.begin_fetch(&session).is_none());

    let timeout = ChatError::Transport("no response within 10000 ms".to_owned());
    let outcome = poll.complete_fetch(&mut session, req, Err(timeout));

    assert_eq!(outcome, FetchOutcome::RetryAfter(Duration::from_millis(10_000)));
    assert_eq!(poll.begin_fetch(&session), Some(FetchRequest { channel: Channel::World, last_id: 0 }));
}

#[test]
fn stopped_loop_still_applies_issued_response() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    poll.stop();

    let outcome = poll.complete_fetch(&mut session, req, Ok(ok_response(vec![message("t", "s", "x")], 4)));

    assert!(matches!(outcome, FetchOutcome::Messages { .. }));
    assert_eq!(session.cursors.get(Channel::World), 4);
}

#[test]
fn stopped_loop_does_not_retry() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let req = poll.begin_fetch(&session).unwrap();
    poll.stop();

    let outcome = poll.complete_fetch(&mut session, req, Err(ChatError::Transport("offline".to_owned())));

    assert_eq!(outcome, FetchOutcome::Dropped);
}

#[test]
fn cursor_is_monotonic_across_successful_fetches() {
    let mut poll = poll_loop();
    let mut session = ChatSession::default();
    let mut previous = 0;
    for last_id in [4, 6, 5, 11, 11, 2, 20] {
        let req = poll.begin_fetch(&session).unwrap();
        poll.complete_fetch(&mut session, req, Ok(ok_response(vec![message("t", "s", "x")], last_id)));
        let now = session.cursors.get(Channel::World);
        assert!(now >= previous, "cursor went from {previous} to {now}");
        previous = now;
    }
    assert_eq!(previous, 20);
}
