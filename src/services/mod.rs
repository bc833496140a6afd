//! Backends a user turn can be routed to.
//!
//! Each route has its own request/response shape and its own trait so the
//! dispatcher can be driven by HTTP endpoints, the in-process fallbacks, or
//! test doubles.
//!
//! - `http` - JSON-over-POST clients for the deployed math and search endpoints
//! - `solver` - in-process math solver used when no math endpoint is configured
//! - `duckduckgo` - instant-answer search used when no search endpoint is configured

pub mod duckduckgo;
pub mod http;
pub mod solver;

pub use duckduckgo::DuckDuckGoSearchService;
pub use http::{HttpMathService, HttpSearchService};
pub use solver::LocalMathService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::SourceLink;

/// Transport or decoding failure while talking to a backend.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathRequest {
    pub expression: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MathResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MathResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<SearchHit> for SourceLink {
    fn from(hit: SearchHit) -> Self {
        Self {
            title: hit.title.unwrap_or_default(),
            snippet: hit.snippet.unwrap_or_default(),
            url: hit.url.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MathService: Send + Sync {
    async fn evaluate(&self, request: &MathRequest) -> DispatchResult<MathResponse>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait SearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> DispatchResult<SearchResponse>;
}

/// Whole numbers print without a fractional part, the rest use the shortest
/// round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
