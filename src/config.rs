use crate::dispatch::Dispatcher;
use crate::services::{
    DuckDuckGoSearchService, HttpMathService, HttpSearchService, LocalMathService, MathService,
    SearchService, http::build_client,
};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const MATH_ENDPOINT_VAR: &str = "ROTYCHAT_MATH_ENDPOINT";
pub const SEARCH_ENDPOINT_VAR: &str = "ROTYCHAT_SEARCH_ENDPOINT";
pub const TIMEOUT_VAR: &str = "ROTYCHAT_REQUEST_TIMEOUT_SECS";
pub const DATA_DIR_VAR: &str = "ROTYCHAT_DATA_DIR";

/// Runtime settings, read from the environment after `.env` / bundled config
/// have been loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub math_endpoint: Option<String>,
    pub search_endpoint: Option<String>,
    /// Unset means requests may run forever.
    pub request_timeout: Option<Duration>,
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let request_timeout = get(TIMEOUT_VAR)
            .map(|raw| {
                raw.parse::<u64>()
                    .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
            })
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            math_endpoint: get(MATH_ENDPOINT_VAR),
            search_endpoint: get(SEARCH_ENDPOINT_VAR),
            request_timeout,
            data_dir: get(DATA_DIR_VAR).map(PathBuf::from),
        })
    }

    /// Wires the configured endpoints into a dispatcher. Unset endpoints fall
    /// back to the in-process solver and the DuckDuckGo instant-answer API.
    pub fn dispatcher(&self) -> Result<Dispatcher> {
        let client = build_client(self.request_timeout).context("failed to build HTTP client")?;

        let math: Arc<dyn MathService> = match &self.math_endpoint {
            Some(endpoint) => {
                tracing::info!(%endpoint, "using remote math endpoint");
                Arc::new(HttpMathService::new(client.clone(), endpoint.clone()))
            }
            None => {
                tracing::info!("no {MATH_ENDPOINT_VAR} set, solving math locally");
                Arc::new(LocalMathService)
            }
        };

        let search: Arc<dyn SearchService> = match &self.search_endpoint {
            Some(endpoint) => {
                tracing::info!(%endpoint, "using remote search endpoint");
                Arc::new(HttpSearchService::new(client, endpoint.clone()))
            }
            None => {
                tracing::info!("no {SEARCH_ENDPOINT_VAR} set, searching DuckDuckGo directly");
                Arc::new(DuckDuckGoSearchService::new(client))
            }
        };

        Ok(Dispatcher::new(math, search))
    }

    /// Where client-local preferences live on native targets.
    pub fn storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Some(data_dir) = dirs::data_local_dir() {
            return data_dir.join("rotychat");
        }
        PathBuf::from("cache")
    }
}
