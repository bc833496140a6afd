use dioxus::prelude::*;

#[component]
pub fn ProfileView() -> Element {
    let mut name = use_signal(|| "Пользователь".to_string());
    let mut email = use_signal(|| "user@example.com".to_string());

    rsx! {
        div { class: "panel",
            div { class: "panel-inner",
                h3 { class: "panel-title", "Профиль" }
                div { class: "card profile-card",
                    div { class: "avatar avatar-large gradient-bg", "П" }
                    div { class: "stack grow",
                        label { class: "field",
                            span { "Имя пользователя" }
                            input {
                                r#type: "text",
                                value: "{name}",
                                oninput: move |ev| name.set(ev.value()),
                            }
                        }
                        label { class: "field",
                            span { "Email" }
                            input {
                                r#type: "email",
                                value: "{email}",
                                oninput: move |ev| email.set(ev.value()),
                            }
                        }
                        div { class: "hstack",
                            span { class: "badge", "Free Plan" }
                            button { class: "btn btn-link", r#type: "button", "Улучшить план" }
                        }
                        button { class: "btn btn-gradient", r#type: "button", "Сохранить изменения" }
                    }
                }
            }
        }
    }
}
