use crate::config::AppConfig;
use crate::dispatch::{Conversation, Dispatcher, Reply};
use crate::preferences::PreferenceStore;
use crate::theme::{root_class_script, theme_definition};
use crate::views::{ChatView, DocsView, HistoryView, PricingView, ProfileView, SettingsView};
use dioxus::prelude::*;

const APP_CSS: Asset = asset!("/assets/rotychat.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Chat,
    History,
    Settings,
    Pricing,
    Docs,
    Profile,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Chat,
        Section::History,
        Section::Settings,
        Section::Pricing,
        Section::Docs,
        Section::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Chat => "Чат",
            Section::History => "История",
            Section::Settings => "Настройки",
            Section::Pricing => "Тарифы",
            Section::Docs => "Документация",
            Section::Profile => "Профиль",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Chat => "💬",
            Section::History => "🕘",
            Section::Settings => "⚙",
            Section::Pricing => "💳",
            Section::Docs => "📖",
            Section::Profile => "👤",
        }
    }
}

/// Everything the page needs that comes from the environment.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub preferences: PreferenceStore,
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        self.dispatcher.same_backends(&other.dispatcher) && self.preferences == other.preferences
    }
}

fn load_state() -> Result<AppState, String> {
    let config = AppConfig::from_env().map_err(|err| format!("{err:#}"))?;
    let dispatcher = config.dispatcher().map_err(|err| format!("{err:#}"))?;
    let preferences = PreferenceStore::load(config.storage_dir());
    tracing::info!(dark_mode = preferences.is_dark_mode(), "preferences loaded");
    Ok(AppState {
        dispatcher,
        preferences,
    })
}

#[component]
pub fn App() -> Element {
    let state = use_hook(load_state);

    match state {
        Ok(state) => rsx! {
            Shell { state }
        },
        Err(message) => {
            tracing::error!(%message, "failed to start");
            rsx! {
                document::Link { rel: "stylesheet", href: APP_CSS }
                div { class: "startup-error",
                    h1 { "RotyChat AI" }
                    p { "Ошибка конфигурации: {message}" }
                }
            }
        }
    }
}

/// Owns the session state so it survives switching between sections.
///
/// The `dark`/`light` class sits on the shell div and is mirrored onto
/// `<html>` so page-level rules keyed on `html.dark` apply too.
#[component]
fn Shell(state: AppState) -> Element {
    let preferences = use_signal(|| state.preferences.clone());
    let active_section = use_signal(|| Section::Chat);
    let conversation = use_signal(Conversation::new);
    let send_message = use_send_message(conversation, state.dispatcher.clone());
    let theme = preferences.read().theme();

    use_effect(move || {
        let script = root_class_script(preferences.read().theme());
        let _ = document::eval(&script);
    });

    rsx! {
        ThemeStyles { preferences }
        div { class: format_args!("app-shell {}", theme.root_class()),
            Sidebar { active_section }
            main { class: "main",
                AppHeader { active_section, preferences }
                SectionPanel { active_section, preferences, conversation, send_message }
            }
        }
    }
}

/// One submission: append the user turn, resolve it off the render path, then
/// append the answer. The task is tied to the app root so leaving the chat
/// section cannot strand the busy flag.
fn use_send_message(mut conversation: Signal<Conversation>, dispatcher: Dispatcher) -> Callback<String> {
    use_callback(move |text: String| {
        let Some(turn) = conversation.with_mut(|session| session.begin(&text)) else {
            return;
        };
        tracing::debug!(route = ?turn.query.route(), "dispatching turn");
        let dispatcher = dispatcher.clone();
        let task = spawn_forever(async move {
            let reply = dispatcher.resolve(&turn.query).await;
            conversation.with_mut(|session| session.finish(reply));
        });
        if task.is_none() {
            tracing::error!("no runtime to dispatch the turn on");
            conversation.with_mut(|session| session.finish(Reply::failure()));
        }
    })
}

#[component]
fn ThemeStyles(preferences: Signal<PreferenceStore>) -> Element {
    let definition = theme_definition(preferences.read().theme());
    rsx! {
        document::Link { rel: "stylesheet", href: APP_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn Sidebar(active_section: Signal<Section>) -> Element {
    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-brand",
                h1 { class: "gradient-text", "RotyChat AI" }
                p { class: "text-muted", "Умный ассистент для всех задач" }
            }
            div { class: "sidebar-body",
                SectionNav { active_section, on_navigate: move |_| {} }
                div { class: "promo-card",
                    h3 { "✨ Подключить API" }
                    p { class: "text-muted", "Расширьте возможности через внешние сервисы" }
                    button { class: "btn btn-gradient btn-block", r#type: "button", "Настроить" }
                }
            }
            div { class: "sidebar-footer",
                div { class: "avatar gradient-bg", "П" }
                div { class: "sidebar-user",
                    p { class: "user-name", "Пользователь" }
                    p { class: "text-muted", "Free Plan" }
                }
                button { class: "btn btn-ghost btn-icon", r#type: "button", "⋮" }
            }
        }
    }
}

#[component]
fn SectionNav(active_section: Signal<Section>, on_navigate: EventHandler<Section>) -> Element {
    let mut active_section = active_section;
    rsx! {
        nav { class: "section-nav",
            for section in Section::ALL {
                button {
                    key: "{section.label()}",
                    class: format_args!(
                        "nav-item {}",
                        if active_section() == section { "active" } else { "" }
                    ),
                    r#type: "button",
                    onclick: move |_| {
                        active_section.set(section);
                        on_navigate.call(section);
                    },
                    span { class: "nav-icon", "{section.icon()}" }
                    span { class: "nav-label", "{section.label()}" }
                }
            }
        }
    }
}

#[component]
fn AppHeader(active_section: Signal<Section>, preferences: Signal<PreferenceStore>) -> Element {
    let mut menu_open = use_signal(|| false);
    let mut preferences = preferences;
    let definition = theme_definition(preferences.read().theme());

    rsx! {
        header { class: "app-header",
            div { class: "header-left",
                button {
                    class: "btn btn-ghost btn-icon menu-button",
                    r#type: "button",
                    onclick: move |_| menu_open.set(true),
                    "☰"
                }
                h2 { class: "header-title", "{active_section().label()}" }
            }
            div { class: "header-right",
                span { class: "badge", "🌐 🧮 AI + Интернет" }
                button {
                    class: "btn btn-ghost btn-icon",
                    r#type: "button",
                    title: "{definition.toggle_label}",
                    onclick: move |_| {
                        if let Err(err) = preferences.with_mut(|store| store.toggle()) {
                            tracing::error!(error = %err, "failed to persist dark mode");
                        }
                    },
                    "{definition.toggle_icon}"
                }
                button { class: "btn btn-ghost btn-icon", r#type: "button", "🔔" }
            }
        }
        if menu_open() {
            div { class: "sheet-overlay", onclick: move |_| menu_open.set(false) }
            div { class: "sheet",
                div { class: "sheet-header",
                    span { class: "gradient-text", "RotyChat AI" }
                }
                SectionNav {
                    active_section,
                    on_navigate: move |_| menu_open.set(false),
                }
            }
        }
    }
}

#[component]
fn SectionPanel(
    active_section: Signal<Section>,
    preferences: Signal<PreferenceStore>,
    conversation: Signal<Conversation>,
    send_message: Callback<String>,
) -> Element {
    match active_section() {
        Section::Chat => rsx! { ChatView { conversation, on_send: send_message } },
        Section::History => rsx! { HistoryView {} },
        Section::Settings => rsx! { SettingsView { preferences } },
        Section::Pricing => rsx! { PricingView {} },
        Section::Docs => rsx! { DocsView {} },
        Section::Profile => rsx! { ProfileView {} },
    }
}
