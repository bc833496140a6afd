use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One citation shown under an assistant answer from the search route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<SourceLink>>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        matches!(self.role, Role::User)
    }

    /// Links worth rendering: entries without a url are never shown.
    pub fn visible_sources(&self) -> impl Iterator<Item = &SourceLink> {
        self.search_results
            .iter()
            .flatten()
            .filter(|link| !link.url.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Class applied to the root element of the page.
    pub fn root_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_search_results_in_camel_case() {
        let message = Message {
            id: 7,
            role: Role::Assistant,
            content: "hi".into(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
            search_results: Some(vec![SourceLink {
                title: "A".into(),
                snippet: "s".into(),
                url: "http://a".into(),
            }]),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["searchResults"][0]["url"], "http://a");
    }

    #[test]
    fn message_without_sources_omits_field() {
        let message = Message {
            id: 1,
            role: Role::User,
            content: "2+2".into(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
            search_results: None,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("searchResults").is_none());
    }

    #[test]
    fn theme_follows_dark_flag() {
        assert_eq!(ThemeMode::from_dark_flag(true).root_class(), "dark");
        assert_eq!(ThemeMode::from_dark_flag(false).root_class(), "light");
    }
}
