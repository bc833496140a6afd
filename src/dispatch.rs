//! Conversation state and the per-turn dispatch to the math or search backend.

use crate::classifier::{Route, classify};
use crate::services::{
    DispatchResult, MathRequest, MathResponse, MathService, SearchRequest, SearchResponse,
    SearchService, format_number,
};
use crate::types::{Message, Role, SourceLink};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;

pub const GREETING: &str = "Привет! Я RotyChat AI с доступом в интернет и калькулятором! Задайте любой вопрос или попросите что-нибудь посчитать.";
pub const GENERIC_ERROR: &str =
    "Произошла ошибка при обработке запроса. Пожалуйста, попробуйте снова.";
pub const MATH_FALLBACK_ERROR: &str = "Не удалось вычислить выражение.";
pub const SEARCH_NOTHING_FOUND: &str = "Не удалось найти информацию. Попробуйте другой запрос.";

/// Snippet the search backend sends when it has nothing useful.
pub const PLACEHOLDER_SNIPPET: &str = "К сожалению, по запросу";

/// Outbound request for one turn. Each route carries its own payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Math(MathRequest),
    Search(SearchRequest),
}

impl Query {
    pub fn for_input(input: &str) -> Self {
        match classify(input) {
            Route::Math => Self::Math(MathRequest {
                expression: input.to_string(),
            }),
            Route::Search => Self::Search(SearchRequest {
                query: input.to_string(),
            }),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Math(_) => Route::Math,
            Self::Search(_) => Route::Search,
        }
    }
}

/// A turn that has been accepted and is waiting for its answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub query: Query,
}

/// Normalized outcome of a dispatch, ready to become an assistant message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub search_results: Option<Vec<SourceLink>>,
}

impl Reply {
    fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            search_results: None,
        }
    }

    /// The generic error shown when a turn could not be answered at all.
    pub fn failure() -> Self {
        Self::text(GENERIC_ERROR)
    }
}

/// Append-only message store plus the busy flag.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
    is_searching: bool,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// A session seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut conversation = Self::empty();
        conversation.push(Role::Assistant, GREETING.to_string(), None);
        conversation
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            is_searching: false,
            next_id: 1,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Accepts a submission. Returns `None` without touching state for blank
    /// input or while another turn is in flight.
    pub fn begin(&mut self, input: &str) -> Option<Turn> {
        if input.trim().is_empty() || self.is_searching {
            return None;
        }

        self.push(Role::User, input.to_string(), None);
        self.is_searching = true;
        Some(Turn {
            query: Query::for_input(input),
        })
    }

    /// Records the answer for the in-flight turn and clears the busy flag.
    pub fn finish(&mut self, reply: Reply) {
        self.push(Role::Assistant, reply.content, reply.search_results);
        self.is_searching = false;
    }

    fn push(&mut self, role: Role, content: String, search_results: Option<Vec<SourceLink>>) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: OffsetDateTime::now_utc(),
            search_results,
        });
    }
}

/// Sends turns to the backend picked by their route.
#[derive(Clone)]
pub struct Dispatcher {
    math: Arc<dyn MathService>,
    search: Arc<dyn SearchService>,
}

impl Dispatcher {
    pub fn new(math: Arc<dyn MathService>, search: Arc<dyn SearchService>) -> Self {
        Self { math, search }
    }

    /// Whether both dispatchers talk to the very same backend instances.
    pub fn same_backends(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.math, &other.math) && Arc::ptr_eq(&self.search, &other.search)
    }

    /// Runs one request and turns every outcome, failures included, into a
    /// reply.
    pub async fn resolve(&self, query: &Query) -> Reply {
        let outcome = match query {
            Query::Math(request) => self.math.evaluate(request).await.map(math_reply),
            Query::Search(request) => self
                .search
                .search(request)
                .await
                .map(|response| search_reply(&request.query, response)),
        };

        finalize(query, outcome)
    }

    /// `begin`, `resolve` and `finish` in one call. Returns whether the input
    /// was accepted.
    pub async fn send(&self, conversation: &mut Conversation, input: &str) -> bool {
        let Some(turn) = conversation.begin(input) else {
            return false;
        };
        let reply = self.resolve(&turn.query).await;
        conversation.finish(reply);
        true
    }
}

fn finalize(query: &Query, outcome: DispatchResult<Reply>) -> Reply {
    match outcome {
        Ok(reply) => {
            tracing::debug!(route = ?query.route(), "dispatch answered");
            reply
        }
        Err(err) => {
            tracing::warn!(route = ?query.route(), error = %err, "dispatch failed");
            Reply::failure()
        }
    }
}

pub fn math_reply(response: MathResponse) -> Reply {
    let Some(result) = response.result.filter(|value| !value.is_null()) else {
        return Reply::text(
            response
                .error
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| MATH_FALLBACK_ERROR.to_string()),
        );
    };

    let mut content = format!(
        "{}\n\nОтвет: {}",
        response.explanation.unwrap_or_default(),
        display_value(&result)
    );
    if !response.steps.is_empty() {
        content.push_str("\n\nРешение:\n");
        content.push_str(&response.steps.join("\n"));
    }
    Reply::text(content)
}

pub fn search_reply(query: &str, response: SearchResponse) -> Reply {
    let hits = response.results.unwrap_or_default();
    let Some(first) = hits.first() else {
        return Reply::text(SEARCH_NOTHING_FOUND);
    };

    let snippet = first
        .snippet
        .as_deref()
        .filter(|snippet| !snippet.is_empty() && *snippet != PLACEHOLDER_SNIPPET);
    let Some(snippet) = snippet else {
        return Reply::text(format!(
            "К сожалению, по запросу \"{query}\" я не нашёл конкретной информации. Попробуйте переформулировать вопрос."
        ));
    };

    let content =
        format!("По вашему запросу \"{query}\" я нашёл следующую информацию:\n\n{snippet}");
    let links: Vec<SourceLink> = hits
        .into_iter()
        .map(SourceLink::from)
        .filter(|link| !link.url.is_empty())
        .collect();

    Reply {
        content,
        search_results: (!links.is_empty()).then_some(links),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if !(number.is_i64() || number.is_u64()) => format_number(float),
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SearchHit;
    use serde_json::json;

    fn hit(title: &str, snippet: &str, url: &str) -> SearchHit {
        SearchHit {
            title: Some(title.into()),
            snippet: Some(snippet.into()),
            url: Some(url.into()),
        }
    }

    #[test]
    fn new_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Assistant);
        assert!(!conversation.is_searching());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut conversation = Conversation::empty();
        assert!(conversation.begin("   \n\t").is_none());
        assert!(conversation.messages().is_empty());
        assert!(!conversation.is_searching());
    }

    #[test]
    fn begin_keeps_input_verbatim_and_sets_busy() {
        let mut conversation = Conversation::empty();
        let turn = conversation.begin("  2+2 ").unwrap();
        assert_eq!(conversation.messages()[0].content, "  2+2 ");
        assert!(conversation.is_searching());
        assert_eq!(
            turn.query,
            Query::Math(MathRequest {
                expression: "  2+2 ".into()
            })
        );
    }

    #[test]
    fn second_begin_is_rejected_while_busy() {
        let mut conversation = Conversation::empty();
        conversation.begin("какая столица Франции").unwrap();
        assert!(conversation.begin("2+2").is_none());
        assert_eq!(conversation.messages().len(), 1);

        conversation.finish(Reply::text("Париж"));
        assert!(!conversation.is_searching());
        assert!(conversation.begin("2+2").is_some());
    }

    #[test]
    fn failure_reply_clears_busy_flag() {
        let mut conversation = Conversation::new();
        conversation.begin("2+2").unwrap();

        conversation.finish(Reply::failure());

        assert!(!conversation.is_searching());
        let last = conversation.messages().last().unwrap();
        assert_eq!(last.content, GENERIC_ERROR);
        assert!(last.search_results.is_none());
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut conversation = Conversation::new();
        conversation.begin("a").unwrap();
        conversation.finish(Reply::text("b"));
        let ids: Vec<u64> = conversation.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn math_reply_lists_answer_and_steps() {
        let reply = math_reply(MathResponse {
            result: Some(json!(4)),
            explanation: Some("Sum".into()),
            steps: vec!["2+2=4".into()],
            error: None,
        });
        assert_eq!(reply.content, "Sum\n\nОтвет: 4\n\nРешение:\n2+2=4");
        assert!(reply.search_results.is_none());
    }

    #[test]
    fn math_reply_prints_whole_floats_without_fraction() {
        let reply = math_reply(MathResponse {
            result: Some(json!(16.0)),
            explanation: Some("Результат вычисления: 8*2".into()),
            ..MathResponse::default()
        });
        assert_eq!(reply.content, "Результат вычисления: 8*2\n\nОтвет: 16");
    }

    #[test]
    fn math_reply_without_result_uses_error_or_fallback() {
        let reply = math_reply(MathResponse::failure("Ошибка вычисления: Деление на ноль"));
        assert_eq!(reply.content, "Ошибка вычисления: Деление на ноль");

        let reply = math_reply(MathResponse::default());
        assert_eq!(reply.content, MATH_FALLBACK_ERROR);
    }

    #[test]
    fn search_reply_keeps_only_links_with_url() {
        let reply = search_reply(
            "rust",
            SearchResponse {
                results: Some(vec![hit("A", "first", ""), hit("B", "second", "http://a")]),
            },
        );
        assert_eq!(
            reply.content,
            "По вашему запросу \"rust\" я нашёл следующую информацию:\n\nfirst"
        );
        let links = reply.search_results.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://a");
    }

    #[test]
    fn search_reply_without_links_has_no_sources() {
        let reply = search_reply(
            "rust",
            SearchResponse {
                results: Some(vec![hit("A", "first", "")]),
            },
        );
        assert!(reply.search_results.is_none());
    }

    #[test]
    fn search_reply_with_placeholder_snippet_suggests_rephrasing() {
        let reply = search_reply(
            "xyz",
            SearchResponse {
                results: Some(vec![hit("A", PLACEHOLDER_SNIPPET, "http://a")]),
            },
        );
        assert!(reply.content.starts_with("К сожалению, по запросу \"xyz\""));
        assert!(reply.search_results.is_none());
    }

    #[test]
    fn search_reply_without_results() {
        let reply = search_reply("xyz", SearchResponse { results: None });
        assert_eq!(reply.content, SEARCH_NOTHING_FOUND);
        let reply = search_reply(
            "xyz",
            SearchResponse {
                results: Some(Vec::new()),
            },
        );
        assert_eq!(reply.content, SEARCH_NOTHING_FOUND);
    }
}
