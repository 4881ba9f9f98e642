//! Multi-channel chat panel: tab strip, per-channel message containers and
//! the composer row.
//!
//! Message lines are appended imperatively into the containers (the runtime
//! decides scrolling around each append); tab state, visibility and the
//! input value are plain signals.

use leptos::html::Div;
use leptos::prelude::*;

use crate::chat::composer::is_submit_key;
use crate::chat::driver::ChatDriver;
use crate::chat::render::ChatView;
use crate::chat::runtime::ChatRuntime;
use crate::config::ChatConfig;
use crate::state::channel::Channel;
use crate::state::panels::SystemPanel;
use crate::state::scroll::ScrollMetrics;

const CHANNELS: usize = Channel::ALL.len();

/// [`ChatView`] backed by the panel's node refs and signals.
#[derive(Clone, Copy)]
pub struct PanelView {
    containers: [NodeRef<Div>; CHANNELS],
    tab_active: [RwSignal<bool>; CHANNELS],
    visible: [RwSignal<bool>; CHANNELS],
    group_panel: RwSignal<bool>,
    input: RwSignal<String>,
}

impl PanelView {
    fn new() -> Self {
        Self {
            containers: std::array::from_fn(|_| NodeRef::new()),
            tab_active: std::array::from_fn(|_| RwSignal::new(false)),
            visible: std::array::from_fn(|_| RwSignal::new(false)),
            group_panel: RwSignal::new(false),
            input: RwSignal::new(String::new()),
        }
    }

    #[cfg(feature = "csr")]
    fn element(&self, channel: Channel) -> Option<web_sys::HtmlDivElement> {
        self.containers[channel.index()].get_untracked()
    }
}

impl ChatView for PanelView {
    fn container_metrics(&self, channel: Channel) -> Option<ScrollMetrics> {
        #[cfg(feature = "csr")]
        {
            let el = self.element(channel)?;
            Some(ScrollMetrics {
                scroll_height: f64::from(el.scroll_height()),
                scroll_top: f64::from(el.scroll_top()),
                client_height: f64::from(el.client_height()),
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = channel;
            None
        }
    }

    fn append_line(&mut self, channel: Channel, markup: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(el) = self.element(channel) else {
                return;
            };
            let Some(line) = el.owner_document().and_then(|doc| doc.create_element("p").ok()) else {
                return;
            };
            line.set_inner_html(markup);
            let _ = el.append_child(&line);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (channel, markup);
        }
    }

    fn scroll_to_bottom(&mut self, channel: Channel) {
        #[cfg(feature = "csr")]
        {
            if let Some(el) = self.element(channel) {
                el.set_scroll_top(el.scroll_height());
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = channel;
        }
    }

    fn clear_container(&mut self, channel: Channel) {
        #[cfg(feature = "csr")]
        {
            if let Some(el) = self.element(channel) {
                el.set_inner_html("");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = channel;
        }
    }

    fn set_tab_active(&mut self, channel: Channel, active: bool) {
        self.tab_active[channel.index()].set(active);
    }

    fn set_container_visible(&mut self, channel: Channel, visible: bool) {
        self.visible[channel.index()].set(visible);
    }

    fn set_group_panel_visible(&mut self, visible: bool) {
        self.group_panel.set(visible);
    }

    fn input_text(&self) -> String {
        self.input.get_untracked()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input.set(text.to_owned());
    }

    fn alert(&mut self, message: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            log::warn!("{message}");
        }
    }
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

/// Chat panel with one tab and one message container per channel.
///
/// `group_panel` is rendered in the auxiliary panel that is only visible
/// while the `group` channel is selected. `system_panel` sits in a
/// collapsible panel behind the `system-toggle` button.
#[component]
pub fn ChatPanel(
    config: ChatConfig,
    #[prop(optional)] group_panel: Option<Children>,
    #[prop(optional)] system_panel: Option<Children>,
) -> impl IntoView {
    let panel = PanelView::new();
    let input = panel.input;
    let group_visible = panel.group_panel;
    let system = RwSignal::new(SystemPanel::default());
    let driver = ChatDriver::new(ChatRuntime::new(config, panel));

    let boot_driver = driver.clone();
    Effect::new(move || {
        let mut store = crate::util::session_storage::BrowserSessionStore;
        boot_driver.dispatch(|rt| rt.boot(&mut store));
    });

    #[cfg(feature = "csr")]
    {
        use crate::state::history::forget_history_cleared;
        use crate::util::session_storage::BrowserSessionStore;

        let _ = window_event_listener(leptos::ev::beforeunload, move |_| {
            forget_history_cleared(&mut BrowserSessionStore);
        });
    }

    let tabs = Channel::ALL
        .into_iter()
        .map(|channel| {
            let driver = driver.clone();
            let active = panel.tab_active[channel.index()];
            view! {
                <button
                    class="chat-tab"
                    class:active=move || active.get()
                    data-tab=channel.as_str()
                    on:click=move |_| driver.dispatch(|rt| rt.switch_tab(channel))
                >
                    {channel.label()}
                </button>
            }
        })
        .collect::<Vec<_>>();

    let containers = Channel::ALL
        .into_iter()
        .map(|channel| {
            let driver = driver.clone();
            let visible = panel.visible[channel.index()];
            view! {
                <div
                    data-tab=channel.as_str()
                    node_ref=panel.containers[channel.index()]
                    style:display=move || display(visible.get())
                    on:scroll=move |_| driver.dispatch(|rt| rt.scrolled(channel))
                ></div>
            }
        })
        .collect::<Vec<_>>();

    let key_driver = driver.clone();
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if is_submit_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            key_driver.dispatch(ChatRuntime::submit);
        }
    };

    let send_driver = driver.clone();
    let on_send = move |_| send_driver.dispatch(ChatRuntime::submit);

    let clear_driver = driver;
    let on_clear = move |_| {
        clear_driver.dispatch(|rt| {
            rt.clear_input();
            Vec::new()
        });
    };

    view! {
        <div class="chat-panel">
            <div class="chat-tabs">{tabs}</div>
            <div class="chat-messages">{containers}</div>
            <div id="group-panel" style:display=move || display(group_visible.get())>
                {group_panel.map(|children| children())}
            </div>
            <button id="system-toggle" class="btn" on:click=move |_| system.update(SystemPanel::toggle)>
                {move || system.get().caption()}
            </button>
            <div id="system-panel" style:display=move || display(system.get().expanded)>
                {system_panel.map(|children| children())}
            </div>
            <div class="chat-input-row">
                <input
                    class="chat-input"
                    type="text"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button id="send-button" class="btn btn--primary" on:click=on_send>
                    "Send"
                </button>
                <button id="clear-button" class="btn" on:click=on_clear>
                    "Clear"
                </button>
            </div>
        </div>
    }
}
