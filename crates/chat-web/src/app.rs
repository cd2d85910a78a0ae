//! Main App Component

use leptos::prelude::*;

use chat_core::ChatController;

use crate::api;
use crate::components::MessageBubble;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <ChatWidget />
        </main>
    }
}

/// The chat widget: heading, transcript, draft input, send button.
///
/// The [`ChatController`] behind the signal owns all conversational state;
/// the component only mirrors it into the DOM. Each send runs on its own
/// task, so the input stays live while requests are in flight and
/// overlapping replies land in completion order.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let controller = RwSignal::new(ChatController::new());
    let (pending, set_pending) = signal(0usize);

    // Keep the newest line visible as the transcript grows.
    let list_ref = NodeRef::<leptos::html::Div>::new();
    Effect::new(move |_| {
        let _ = controller.with(|c| c.transcript().len());
        let _ = pending.get();
        if let Some(list) = list_ref.get() {
            list.set_scroll_top(list.scroll_height());
        }
    });

    let send = move || {
        let Some(text) = controller.try_update(|c| c.submit()).flatten() else {
            return;
        };

        set_pending.update(|n| *n += 1);
        leptos::task::spawn_local(async move {
            let outcome = api::send_chat(&text).await;
            if let Err(e) = &outcome {
                leptos::logging::error!("chat request failed: {e}");
            }
            controller.update(|c| c.complete(outcome));
            set_pending.update(|n| *n = n.saturating_sub(1));
        });
    };

    view! {
        <div class="chat">
            <header class="chat-header">
                <h1>"Chat"</h1>
            </header>

            <div class="messages" node_ref=list_ref>
                <For
                    each=move || {
                        controller.with(|c| {
                            c.transcript().messages().iter().cloned().enumerate().collect::<Vec<_>>()
                        })
                    }
                    key=|(idx, _)| *idx
                    children=move |(_, message)| view! { <MessageBubble message=message /> }
                />
                <Show when=move || { pending.get() > 0 }>
                    <div class="message message-bot pending">"..."</div>
                </Show>
            </div>

            <div class="input-area">
                <textarea
                    placeholder="Type a message..."
                    prop:value=move || controller.with(|c| c.draft().to_string())
                    on:input=move |ev| controller.update(|c| c.set_draft(event_target_value(&ev)))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            send();
                        }
                    }
                />
                <button on:click=move |_| send()>"Send"</button>
            </div>
        </div>
    }
}
