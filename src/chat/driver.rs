//! Browser driver for [`ChatRuntime`].
//!
//! Holds the runtime behind `Rc<RefCell<_>>` on the UI thread and performs
//! its effects: HTTP calls via `gloo-net` on `spawn_local` tasks, and timers
//! as owned `gloo-timers` handles. Dropping a handle cancels its timer, so
//! replacing a slot is how a pending timer gets superseded.
//!
//! Every request is bounded by the configured request timeout, so each
//! issued fetch is eventually completed and its channel's in-flight slot
//! released.
//!
//! Timer and task callbacks hold a `Weak` reference; once every strong
//! handle (the panel's event handlers) is gone, late callbacks do nothing.
//! Native builds keep the dispatch path and drop effects.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::collections::HashMap;
use std::rc::Rc;
#[cfg(feature = "csr")]
use std::rc::Weak;

use super::render::ChatView;
use super::runtime::{ChatRuntime, Effect};
#[cfg(feature = "csr")]
use super::runtime::TimerSlot;

struct DriverState<V> {
    runtime: ChatRuntime<V>,
    #[cfg(feature = "csr")]
    interval: Option<gloo_timers::callback::Interval>,
    #[cfg(feature = "csr")]
    timers: HashMap<TimerSlot, gloo_timers::callback::Timeout>,
}

pub struct ChatDriver<V> {
    inner: Rc<RefCell<DriverState<V>>>,
}

impl<V> Clone for ChatDriver<V> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

#[cfg(feature = "csr")]
fn millis(duration: std::time::Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl<V: ChatView + 'static> ChatDriver<V> {
    pub fn new(runtime: ChatRuntime<V>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DriverState {
                runtime,
                #[cfg(feature = "csr")]
                interval: None,
                #[cfg(feature = "csr")]
                timers: HashMap::new(),
            })),
        }
    }

    #[cfg(feature = "csr")]
    fn downgrade(&self) -> Weak<RefCell<DriverState<V>>> {
        Rc::downgrade(&self.inner)
    }

    #[cfg(feature = "csr")]
    fn upgrade(weak: &Weak<RefCell<DriverState<V>>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Run one runtime event, then perform the effects it produced.
    ///
    /// The runtime borrow ends before any effect runs, so effects may
    /// dispatch again.
    pub fn dispatch(&self, event: impl FnOnce(&mut ChatRuntime<V>) -> Vec<Effect>) {
        let effects = {
            let mut state = self.inner.borrow_mut();
            event(&mut state.runtime)
        };
        for effect in effects {
            self.perform(effect);
        }
    }

    /// Read-only access to the runtime, for handlers that only inspect it.
    pub fn with_runtime<R>(&self, f: impl FnOnce(&ChatRuntime<V>) -> R) -> R {
        f(&self.inner.borrow().runtime)
    }

    #[cfg(feature = "csr")]
    fn perform(&self, effect: Effect) {
        use crate::net::api;
        use crate::util::cookie::read_cookie;

        match effect {
            Effect::Fetch(request) => {
                let (endpoint, timeout) = self.with_runtime(|rt| {
                    let cfg = rt.config();
                    (cfg.messages_endpoint.clone(), cfg.request_timeout())
                });
                let weak = self.downgrade();
                leptos::task::spawn_local(async move {
                    let result = api::fetch_messages(&endpoint, request, timeout).await;
                    if let Some(driver) = Self::upgrade(&weak) {
                        driver.dispatch(|rt| rt.fetch_completed(request, result));
                    }
                });
            }
            Effect::Send(body) => {
                let (endpoint, header, cookie, timeout) = self.with_runtime(|rt| {
                    let cfg = rt.config();
                    (cfg.send_endpoint.clone(), cfg.csrf_header.clone(), cfg.csrf_cookie.clone(), cfg.request_timeout())
                });
                let token = read_cookie(&cookie);
                let weak = self.downgrade();
                leptos::task::spawn_local(async move {
                    let result = api::send_message(&endpoint, &header, token.as_deref(), &body, timeout).await;
                    if let Some(driver) = Self::upgrade(&weak) {
                        driver.dispatch(|rt| rt.send_completed(result));
                    }
                });
            }
            Effect::StartInterval(period) => {
                let weak = self.downgrade();
                let handle = gloo_timers::callback::Interval::new(millis(period), move || {
                    if let Some(driver) = Self::upgrade(&weak) {
                        driver.dispatch(ChatRuntime::fetch_now);
                    }
                });
                self.inner.borrow_mut().interval = Some(handle);
            }
            Effect::StopInterval => {
                let previous = self.inner.borrow_mut().interval.take();
                drop(previous);
            }
            Effect::Schedule(slot, after) => {
                let weak = self.downgrade();
                let handle = gloo_timers::callback::Timeout::new(millis(after), move || {
                    if let Some(driver) = Self::upgrade(&weak) {
                        driver.dispatch(|rt| rt.timer_fired(slot));
                    }
                });
                let previous = self.inner.borrow_mut().timers.insert(slot, handle);
                drop(previous);
            }
        }
    }

    #[cfg(not(feature = "csr"))]
    #[allow(clippy::unused_self)]
    fn perform(&self, effect: Effect) {
        log::debug!("no browser host; dropping {effect:?}");
    }
}
