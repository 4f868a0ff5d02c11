use crate::common::errors::{ApiError, ApiResult};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Supplies the bearer token attached to outgoing requests, if any.
pub trait TokenSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Connection settings for [`ApiGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

/// JSON-over-HTTP gateway to the booking backend.
///
/// Every call takes a [`CancellationToken`]. A cancelled call resolves to
/// [`ApiError::Cancelled`] without waiting for the network, and a call whose
/// token is already cancelled is never sent. There is no retry policy; the
/// transport timeout comes from [`GatewayConfig::timeout`].
#[derive(Clone)]
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.is_some())
            .finish()
    }
}

impl ApiGateway {
    pub fn new(config: GatewayConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                url: config.base_url.clone(),
                reason: format!("HTTP client creation failed: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens: None,
        })
    }

    /// Attach a token source; its token is sent as `Authorization: Bearer`.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T>(&self, path: &str, cancel: &CancellationToken) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.http.get(&url);
        self.execute("GET", url, request, cancel).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.execute("POST", url, request, cancel).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B, cancel: &CancellationToken) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.http.put(&url).json(body);
        self.execute("PUT", url, request, cancel).await
    }

    async fn execute<T>(
        &self,
        method: &str,
        url: String,
        request: reqwest::RequestBuilder,
        cancel: &CancellationToken,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        if cancel.is_cancelled() {
            log::debug!("{method} {url} skipped: already cancelled");
            return Err(ApiError::Cancelled);
        }

        log::debug!("{method} {url}");
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                log::debug!("{method} {url} cancelled");
                Err(ApiError::Cancelled)
            }
            result = self.send(method, &url, request) => {
                if let Err(e) = &result {
                    log::warn!("{method} {url} failed: {e}");
                }
                result
            }
        }
    }

    async fn send<T>(&self, method: &str, url: &str, request: reqwest::RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(token) = self.tokens.as_ref().and_then(|t| t.bearer_token()) {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
