use super::{DispatchResult, SearchHit, SearchRequest, SearchResponse, SearchService};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const INSTANT_ANSWER_URL: &str = "https://api.duckduckgo.com/";
const USER_AGENT: &str = "RotyChat/1.0";
const MAX_RELATED_TOPICS: usize = 5;

/// Search backed by the DuckDuckGo instant-answer API.
///
/// Reshapes the answer into the search endpoint's `{results}` body so the
/// dispatcher cannot tell the two apart.
pub struct DuckDuckGoSearchService {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoSearchService {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: INSTANT_ANSWER_URL.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstantAnswer {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub abstract_text: Option<String>,
    #[serde(default, rename = "AbstractURL")]
    pub abstract_url: Option<String>,
    #[serde(default)]
    pub related_topics: Vec<RelatedTopic>,
}

/// Either a plain topic or a named group of topics. Groups carry neither
/// `Text` nor `FirstURL` and are skipped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelatedTopic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "FirstURL")]
    pub first_url: Option<String>,
}

pub fn reshape(query: &str, answer: InstantAnswer) -> SearchResponse {
    let mut results = Vec::new();

    if let Some(text) = answer.abstract_text.filter(|text| !text.is_empty()) {
        results.push(SearchHit {
            title: Some(answer.heading.unwrap_or_else(|| "Информация".to_string())),
            snippet: Some(text),
            url: Some(answer.abstract_url.unwrap_or_default()),
        });
    }

    for topic in answer.related_topics.into_iter().take(MAX_RELATED_TOPICS) {
        let (Some(text), Some(url)) = (topic.text, topic.first_url) else {
            continue;
        };
        let title = match text.split_once(" - ") {
            Some((head, _)) => head.to_string(),
            None => "Результат".to_string(),
        };
        results.push(SearchHit {
            title: Some(title),
            snippet: Some(text),
            url: Some(url),
        });
    }

    if results.is_empty() {
        results.push(SearchHit {
            title: Some("Результаты не найдены".to_string()),
            snippet: Some(format!(
                "К сожалению, по запросу \"{query}\" информация не найдена. Попробуйте переформулировать вопрос."
            )),
            url: Some(String::new()),
        });
    }

    SearchResponse {
        results: Some(results),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SearchService for DuckDuckGoSearchService {
    async fn search(&self, request: &SearchRequest) -> DispatchResult<SearchResponse> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("user-agent", USER_AGENT)
            .query(&[
                ("q", request.query.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        // Served as application/x-javascript, so decode the text ourselves.
        let body = response.text().await?;
        let answer = serde_json::from_str::<InstantAnswer>(&body)?;
        Ok(reshape(&request.query, answer))
    }
}
