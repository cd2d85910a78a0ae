//! UI Components

use leptos::prelude::*;

use chat_core::Message;

/// Message bubble component
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let class = format!("message message-{}", message.role);
    let time = message.timestamp.format("%H:%M").to_string();

    view! {
        <div class=class>
            <span class="role">{message.role.to_string()}</span>
            <p class="content">{message.text.clone()}</p>
            <span class="time">{time}</span>
        </div>
    }
}
