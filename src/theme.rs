use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub toggle_icon: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            toggle_icon: "☀",
            toggle_label: "Светлая тема",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            toggle_icon: "☾",
            toggle_label: "Тёмная тема",
        },
    }
}

/// Script that puts the mode's class on the document root, replacing the
/// other one.
pub fn root_class_script(mode: ThemeMode) -> String {
    let (add, remove) = match mode {
        ThemeMode::Dark => ("dark", "light"),
        ThemeMode::Light => ("light", "dark"),
    };
    format!(
        "document.documentElement.classList.remove('{remove}'); \
         document.documentElement.classList.add('{add}');"
    )
}

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-sidebar: #f7f7fb;
    --color-bg-card: #ffffff;
    --color-bg-muted: #f1f1f6;
    --color-text-primary: #14141f;
    --color-text-muted: #6b6b7b;
    --color-border: #e4e4ee;
    --color-accent: #8b5cf6;
    --color-accent-secondary: #0ea5e9;
    --color-accent-soft: rgba(139, 92, 246, 0.12);
    --color-user-text: #ffffff;
    --color-input-bg: #ffffff;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f0f17;
    --color-bg-sidebar: #14141f;
    --color-bg-card: #1a1a27;
    --color-bg-muted: #232333;
    --color-text-primary: #f4f4f8;
    --color-text-muted: #9d9db0;
    --color-border: #2a2a3c;
    --color-accent: #a78bfa;
    --color-accent-secondary: #38bdf8;
    --color-accent-soft: rgba(167, 139, 250, 0.16);
    --color-user-text: #ffffff;
    --color-input-bg: #14141f;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
"#;
