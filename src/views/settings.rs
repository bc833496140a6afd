use crate::preferences::PreferenceStore;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SettingsTab {
    General,
    Api,
    Appearance,
}

impl SettingsTab {
    fn label(self) -> &'static str {
        match self {
            SettingsTab::General => "Общие",
            SettingsTab::Api => "API",
            SettingsTab::Appearance => "Внешний вид",
        }
    }
}

#[component]
pub fn SettingsView(preferences: Signal<PreferenceStore>) -> Element {
    let active_tab = use_signal(|| SettingsTab::General);

    rsx! {
        div { class: "panel",
            div { class: "panel-inner",
                h3 { class: "panel-title", "Настройки" }
                div { class: "tabs",
                    TabButton { active_tab, tab: SettingsTab::General }
                    TabButton { active_tab, tab: SettingsTab::Api }
                    TabButton { active_tab, tab: SettingsTab::Appearance }
                }
                {
                    match active_tab() {
                        SettingsTab::General => rsx! { GeneralTab {} },
                        SettingsTab::Api => rsx! { ApiTab {} },
                        SettingsTab::Appearance => rsx! { AppearanceTab { preferences } },
                    }
                }
            }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<SettingsTab>, tab: SettingsTab) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab { "tab active" } else { "tab" };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active_tab.set(tab),
            "{tab.label()}"
        }
    }
}

#[component]
fn SettingRow(label: &'static str, hint: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "setting-row",
            div {
                p { class: "setting-label", "{label}" }
                p { class: "text-muted", "{hint}" }
            }
            {children}
        }
    }
}

#[component]
fn GeneralTab() -> Element {
    let mut fast_mode = use_signal(|| false);
    let mut notifications = use_signal(|| false);
    rsx! {
        div { class: "card",
            SettingRow { label: "Быстрый режим", hint: "Ускоренная обработка запросов",
                input {
                    class: "switch",
                    r#type: "checkbox",
                    checked: fast_mode(),
                    onchange: move |ev| fast_mode.set(ev.checked()),
                }
            }
            SettingRow { label: "Уведомления", hint: "Получать уведомления о новых сообщениях",
                input {
                    class: "switch",
                    r#type: "checkbox",
                    checked: notifications(),
                    onchange: move |ev| notifications.set(ev.checked()),
                }
            }
        }
    }
}

#[component]
fn ApiTab() -> Element {
    rsx! {
        div { class: "card",
            h4 { class: "card-title", "Подключение внешних API" }
            label { class: "field",
                span { "OpenAI API Key" }
                input { r#type: "password", placeholder: "sk-..." }
            }
            label { class: "field",
                span { "Webhook URL" }
                input { r#type: "url", placeholder: "https://..." }
            }
            button { class: "btn btn-gradient", r#type: "button", "Сохранить" }
        }
    }
}

#[component]
fn AppearanceTab(preferences: Signal<PreferenceStore>) -> Element {
    let mut preferences = preferences;
    let is_dark = preferences.read().is_dark_mode();
    rsx! {
        div { class: "card",
            SettingRow { label: "Тёмная тема", hint: "Использовать тёмное оформление",
                input {
                    class: "switch",
                    r#type: "checkbox",
                    checked: is_dark,
                    onchange: move |ev| {
                        if let Err(err) = preferences.with_mut(|store| store.set(ev.checked())) {
                            tracing::error!(error = %err, "failed to persist dark mode");
                        }
                    },
                }
            }
        }
    }
}
