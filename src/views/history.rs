use dioxus::prelude::*;

const DEMO_DIALOGS: [u32; 3] = [1, 2, 3];

#[component]
pub fn HistoryView() -> Element {
    rsx! {
        div { class: "panel",
            div { class: "panel-inner",
                h3 { class: "panel-title", "История диалогов" }
                div { class: "stack",
                    for index in DEMO_DIALOGS {
                        div { key: "{index}", class: "card card-hover",
                            div { class: "card-row",
                                div {
                                    h4 { class: "card-title", "Диалог {index}" }
                                    p { class: "text-muted", "Последнее сообщение: Это демо-ответ AI..." }
                                }
                                span { class: "badge badge-outline", "Сегодня" }
                            }
                        }
                    }
                }
            }
        }
    }
}
