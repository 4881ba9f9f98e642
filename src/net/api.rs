//! REST helpers for the chat endpoints.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning a transport error, since these endpoints
//! are only reachable from the page.
//!
//! ERROR HANDLING
//! ==============
//! Network failures, non-2xx statuses, unreadable bodies and requests that
//! outlive their timeout all map to the transport side of [`ChatError`]
//! (see [`ChatError::is_transport`]) so the poll loop can schedule its
//! retry. A well-formed `{status: "error"}` body is returned as `Ok` and left
//! to the caller to interpret.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "csr"))]
use std::future::Future;
use std::time::Duration;

use super::types::{FetchRequest, FetchResponse, SendRequest, SendResponse};
use crate::error::ChatError;

#[cfg(any(test, feature = "csr"))]
fn status_error(ok: bool, status: u16) -> Result<(), ChatError> {
    if ok { Ok(()) } else { Err(ChatError::HttpStatus(status)) }
}

#[cfg(any(test, feature = "csr"))]
fn transport_error(err: impl std::fmt::Display) -> ChatError {
    ChatError::Transport(err.to_string())
}

#[cfg(any(test, feature = "csr"))]
fn decode_error(err: impl std::fmt::Display) -> ChatError {
    ChatError::Decode(err.to_string())
}

/// Resolve `request`, or fail with a transport error once `deadline` fires.
///
/// The losing future is dropped; a late response is discarded.
#[cfg(any(test, feature = "csr"))]
async fn within<T>(
    request: impl Future<Output = Result<T, ChatError>>,
    deadline: impl Future<Output = ()>,
    limit: Duration,
) -> Result<T, ChatError> {
    use futures::future::{Either, select};

    let request = std::pin::pin!(request);
    let deadline = std::pin::pin!(deadline);
    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ChatError::Transport(format!("no response within {} ms", limit.as_millis()))),
    }
}

#[cfg(feature = "csr")]
fn deadline(limit: Duration) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(u32::try_from(limit.as_millis()).unwrap_or(u32::MAX))
}

/// Fetch messages newer than `request.last_id` for `request.channel`.
///
/// # Errors
///
/// Transport-class [`ChatError`] on network failure, non-2xx status, an
/// undecodable body, or no answer within `timeout`.
pub async fn fetch_messages(
    endpoint: &str,
    request: FetchRequest,
    timeout: Duration,
) -> Result<FetchResponse, ChatError> {
    #[cfg(feature = "csr")]
    {
        let call = async {
            let resp = gloo_net::http::Request::get(endpoint)
                .query(request.query_pairs())
                .send()
                .await
                .map_err(transport_error)?;
            status_error(resp.ok(), resp.status())?;
            resp.json::<FetchResponse>().await.map_err(decode_error)
        };
        within(call, deadline(timeout), timeout).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (endpoint, request, timeout);
        Err(ChatError::Transport("not available outside the browser".to_owned()))
    }
}

/// Post a composed message with the CSRF header.
///
/// # Errors
///
/// Transport-class [`ChatError`] on network failure, non-2xx status, an
/// undecodable body, or no answer within `timeout`.
pub async fn send_message(
    endpoint: &str,
    csrf_header: &str,
    csrf_token: Option<&str>,
    body: &SendRequest,
    timeout: Duration,
) -> Result<SendResponse, ChatError> {
    #[cfg(feature = "csr")]
    {
        let call = async {
            let mut builder = gloo_net::http::Request::post(endpoint);
            match csrf_token {
                Some(token) => builder = builder.header(csrf_header, token),
                None => log::warn!("no CSRF token cookie; sending without {csrf_header}"),
            }
            let resp = builder
                .json(body)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            status_error(resp.ok(), resp.status())?;
            resp.json::<SendResponse>().await.map_err(decode_error)
        };
        within(call, deadline(timeout), timeout).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (endpoint, csrf_header, csrf_token, body, timeout);
        Err(ChatError::Transport("not available outside the browser".to_owned()))
    }
}
