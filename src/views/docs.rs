use dioxus::prelude::*;

const CONNECT_EXAMPLE: &str = "POST /api/connect\n{ \"provider\": \"openai\", \"key\": \"sk-...\" }";

#[component]
pub fn DocsView() -> Element {
    rsx! {
        div { class: "panel",
            div { class: "panel-inner",
                h3 { class: "panel-title", "Документация" }
                div { class: "stack",
                    div { class: "card",
                        h4 { class: "card-title", "Начало работы" }
                        p { class: "text-muted",
                            "RotyChat AI — это платформа для общения с искусственным интеллектом. "
                            "Просто задавайте вопросы в чате и получайте развёрнутые ответы. "
                            "Математические выражения решаются калькулятором, остальные вопросы ищутся в интернете."
                        }
                    }
                    div { class: "card",
                        h4 { class: "card-title", "Подключение API" }
                        p { class: "text-muted",
                            "Для расширения функционала вы можете подключить внешние сервисы через раздел "
                            "Настройки → API. Поддерживаются OpenAI, Anthropic и другие провайдеры."
                        }
                        pre { class: "code-block", "{CONNECT_EXAMPLE}" }
                    }
                }
            }
        }
    }
}
