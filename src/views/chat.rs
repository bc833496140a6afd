use crate::dispatch::Conversation;
use crate::types::{Message, Role};
use crate::views::shared::format_message_time;
use dioxus::events::Key;
use dioxus::prelude::*;

const BUSY_LABEL: &str = "Ищу информацию в интернете...";
const INPUT_PLACEHOLDER: &str = "Напишите сообщение...";

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

#[component]
pub fn ChatView(conversation: Signal<Conversation>, on_send: EventHandler<String>) -> Element {
    let mut draft = use_signal(String::new);
    let is_searching = conversation.read().is_searching();
    let messages = conversation.read().messages().to_vec();

    let mut submit = move || {
        if conversation.read().is_searching() {
            return;
        }
        let text = draft();
        if text.trim().is_empty() {
            return;
        }
        draft.set(String::new());
        on_send.call(text);
    };

    rsx! {
        div { class: "chat-section",
            div { id: "chat-list", class: "chat-list",
                div { class: "chat-column",
                    for message in messages.iter() {
                        MessageRow { key: "{message.id}", message: message.clone() }
                    }
                }
            }

            div { class: "composer",
                div { class: "composer-inner",
                    if is_searching {
                        div { class: "busy-indicator",
                            span { class: "spin", "🌐" }
                            span { "{BUSY_LABEL}" }
                        }
                    }
                    div { class: "hstack",
                        input {
                            class: "composer-input",
                            r#type: "text",
                            placeholder: INPUT_PLACEHOLDER,
                            value: "{draft}",
                            disabled: is_searching,
                            autofocus: true,
                            oninput: move |ev| draft.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter {
                                    ev.prevent_default();
                                    submit();
                                }
                            },
                        }
                        button {
                            class: "btn btn-gradient btn-icon",
                            r#type: "button",
                            disabled: is_searching,
                            onclick: move |_| submit(),
                            if is_searching {
                                span { class: "spin", "⟳" }
                            } else {
                                "➤"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: Message) -> Element {
    let role = role_class(message.role);
    let time = format_message_time(message.timestamp);
    let sources: Vec<_> = message.visible_sources().cloned().collect();

    rsx! {
        div { class: format_args!("message-row {}", role),
            if !message.is_user() {
                div { class: "avatar gradient-bg", "🤖" }
            }
            div { class: format_args!("bubble {}", role),
                p { class: "bubble-text", "{message.content}" }
                if !sources.is_empty() {
                    div { class: "sources",
                        p { class: "sources-title", "Источники:" }
                        for (idx, source) in sources.iter().enumerate() {
                            a {
                                key: "{idx}",
                                class: "source-link",
                                href: "{source.url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                span { class: "source-icon", "↗" }
                                div { class: "source-body",
                                    p { class: "source-title", "{source.title}" }
                                    p { class: "source-url", "{source.url}" }
                                }
                            }
                        }
                    }
                }
                if let Some(time) = time {
                    p { class: "message-timestamp", "{time}" }
                }
            }
            if message.is_user() {
                div { class: "avatar muted", "П" }
            }
        }
    }
}
