use super::{
    DispatchError, DispatchResult, MathRequest, MathResponse, MathService, SearchRequest,
    SearchResponse, SearchService,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds the shared client. `timeout` bounds the whole request when set.
pub fn build_client(timeout: Option<Duration>) -> DispatchResult<Client> {
    let builder = Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = match timeout {
        Some(limit) => builder.timeout(limit),
        None => builder,
    };
    #[cfg(target_arch = "wasm32")]
    let _ = timeout;
    Ok(builder.build()?)
}

/// POSTs `payload` as JSON and decodes the reply.
///
/// Error statuses still carry a JSON body (`{"error": ...}`) worth showing, so
/// the body is decoded first and the status only matters when decoding fails.
async fn post_json<B, T>(client: &Client, endpoint: &str, payload: &B) -> DispatchResult<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = client.post(endpoint).json(payload).send().await?;
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(DispatchError::Status {
            status: status.as_u16(),
            body,
        }),
        Err(err) => Err(DispatchError::Decode(err)),
    }
}

pub struct HttpMathService {
    client: Client,
    endpoint: String,
}

impl HttpMathService {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MathService for HttpMathService {
    async fn evaluate(&self, request: &MathRequest) -> DispatchResult<MathResponse> {
        tracing::debug!(endpoint = %self.endpoint, "math request");
        post_json(&self.client, &self.endpoint, request).await
    }
}

pub struct HttpSearchService {
    client: Client,
    endpoint: String,
}

impl HttpSearchService {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SearchService for HttpSearchService {
    async fn search(&self, request: &SearchRequest) -> DispatchResult<SearchResponse> {
        tracing::debug!(endpoint = %self.endpoint, "search request");
        post_json(&self.client, &self.endpoint, request).await
    }
}
