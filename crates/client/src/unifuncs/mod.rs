//! UniFuncs Web Search and Web Reader API client.
//!
//! A thin asynchronous client over the two endpoint families of the
//! UniFuncs API. Each call makes exactly one authenticated attempt: no
//! retries, no backoff, and no caching, so every response reflects the
//! remote service directly.
//!
//! ### Wire contract
//!
//! - **Base URL**: `https://api.unifuncs.com/api`
//! - **Authentication**: `Authorization: Bearer <token>` on every request
//! - **Search**: `POST {base}/web-search/search` with a JSON body
//! - **Web reader**: `POST {base}/web-reader/read` with a JSON body, or
//!   `GET {base}/web-reader/{encoded-url}` with equivalent query parameters
//! - **Envelope**: `{"code": <i64>, "message": <string?>, "data": <object?>}`
//!   where `code == 0` is success; non-zero codes pass through untouched
//! - **Local failures** (transport, non-2xx status, malformed body) map to
//!   [`UniFuncsError`] and report the synthetic code `-1`

pub mod error;
pub mod request;
pub mod response;

pub use error::{LOCAL_ERROR_CODE, UniFuncsError};
pub use request::{Freshness, ReadFormat, ReadRequest, SearchRequest};
pub use response::{
    ApiResponse, ImageResult, ReadResponse, SearchData, SearchResponse, WebPage,
};

use crate::format::{self, OutputFormat};
use reqwest::header;
use std::time::{Duration, Instant};

/// Default base URL for the UniFuncs API.
const DEFAULT_BASE_URL: &str = "https://api.unifuncs.com/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = concat!("unisearch/", env!("CARGO_PKG_VERSION"));

/// UniFuncs API client configuration.
#[derive(Debug, Clone)]
pub struct UniFuncsConfig {
    /// Bearer token for the Authorization header.
    pub api_key: String,
    /// Base URL (default: <https://api.unifuncs.com/api>).
    pub base_url: String,
    /// Whole-request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string sent with every request.
    pub user_agent: String,
}

impl Default for UniFuncsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl UniFuncsConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `UNIFUNCS_API_KEY`; errors when it is not set.
    pub fn from_env() -> Result<Self, UniFuncsError> {
        let api_key =
            std::env::var("UNIFUNCS_API_KEY").map_err(|_| UniFuncsError::MissingApiKey)?;

        Ok(Self {
            api_key,
            ..Default::default()
        })
    }
}

/// UniFuncs API client.
#[derive(Debug, Clone)]
pub struct UniFuncsClient {
    http: reqwest::Client,
    config: UniFuncsConfig,
}

impl UniFuncsClient {
    /// Create a new client with the given configuration.
    ///
    /// A missing or empty API key is rejected here, before any request is
    /// made.
    pub fn new(config: UniFuncsConfig) -> Result<Self, UniFuncsError> {
        if config.api_key.is_empty() {
            return Err(UniFuncsError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .build()
            .map_err(UniFuncsError::from)?;

        Ok(Self { http, config })
    }

    /// Create a new client configured from the environment.
    pub fn from_env() -> Result<Self, UniFuncsError> {
        Self::new(UniFuncsConfig::from_env()?)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Execute a web search.
    ///
    /// One POST per call. `freshness` stays out of the body when unset so
    /// the server applies its own default; `page` and `count` are sent as
    /// given, range enforcement is the server's job.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse, UniFuncsError> {
        let url = self.endpoint("web-search/search");

        tracing::debug!("searching UniFuncs API: query={}", req.query);
        let start = Instant::now();

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send()
            .await?;

        let response: SearchResponse = Self::decode(http_response).await?;

        tracing::debug!(
            "search completed in {:?}: code={}, {} pages, {} images",
            start.elapsed(),
            response.code,
            response.web_pages().len(),
            response.images().len()
        );

        Ok(response)
    }

    /// Read a webpage through the web-reader endpoint (POST variant).
    pub async fn read_webpage(&self, req: &ReadRequest) -> Result<ReadResponse, UniFuncsError> {
        let url = self.endpoint("web-reader/read");

        tracing::debug!("reading webpage via POST: url={}", req.url);

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send()
            .await?;

        Self::decode(http_response).await
    }

    /// Read a webpage through the web-reader endpoint (GET variant).
    ///
    /// The target URL travels percent-encoded as a path segment and the
    /// remaining options as query parameters; semantics are identical to
    /// [`read_webpage`](Self::read_webpage).
    pub async fn read_webpage_get(&self, req: &ReadRequest) -> Result<ReadResponse, UniFuncsError> {
        let url = self.endpoint(&format!("web-reader/{}", req.encoded_url()));

        tracing::debug!("reading webpage via GET: url={}", req.url);

        let http_response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .query(&req.to_query_pairs())
            .send()
            .await?;

        Self::decode(http_response).await
    }

    /// Search and render the outcome in one step: page 1, summaries on.
    ///
    /// Never fails; transport and remote errors come back as the
    /// formatter's one-line error strings.
    pub async fn search_formatted(
        &self,
        query: &str,
        freshness: Option<Freshness>,
        output: OutputFormat,
        count: u32,
    ) -> String {
        let req = SearchRequest {
            count,
            freshness,
            ..SearchRequest::new(query)
        };

        let outcome = self.search(&req).await;
        format::format_results(&outcome, output)
    }

    /// Shared status check and envelope decoding for all endpoints.
    async fn decode<T>(http_response: reqwest::Response) -> Result<T, UniFuncsError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = http_response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::debug!("UniFuncs API returned HTTP {status}");
            return Err(UniFuncsError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = http_response.bytes().await.map_err(UniFuncsError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| UniFuncsError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> UniFuncsConfig {
        UniFuncsConfig {
            api_key: "uf-test-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = UniFuncsConfig::default();
        assert_eq!(config.base_url, "https://api.unifuncs.com/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("unisearch/"));
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_client_rejects_empty_api_key() {
        let result = UniFuncsClient::new(UniFuncsConfig::default());
        assert!(matches!(result, Err(UniFuncsError::MissingApiKey)));
    }

    #[test]
    fn test_client_accepts_valid_config() {
        assert!(UniFuncsClient::new(test_config()).is_ok());
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let client = UniFuncsClient::new(UniFuncsConfig {
            base_url: "https://api.unifuncs.com/api/".to_string(),
            ..test_config()
        })
        .unwrap();

        assert_eq!(
            client.endpoint("web-search/search"),
            "https://api.unifuncs.com/api/web-search/search"
        );
    }

    #[test]
    fn test_endpoint_embeds_encoded_read_url() {
        let client = UniFuncsClient::new(test_config()).unwrap();
        let req = ReadRequest::new("https://example.com/a/b");

        assert_eq!(
            client.endpoint(&format!("web-reader/{}", req.encoded_url())),
            "https://api.unifuncs.com/api/web-reader/https%3A%2F%2Fexample.com%2Fa%2Fb"
        );
    }

    #[test]
    fn test_from_env_requires_key() {
        let original = std::env::var("UNIFUNCS_API_KEY").ok();
        unsafe {
            std::env::remove_var("UNIFUNCS_API_KEY");
        }

        let result = UniFuncsConfig::from_env();
        assert!(matches!(result, Err(UniFuncsError::MissingApiKey)));

        unsafe {
            std::env::set_var("UNIFUNCS_API_KEY", "uf-env-key");
        }
        let config = UniFuncsConfig::from_env().unwrap();
        assert_eq!(config.api_key, "uf-env-key");

        unsafe {
            std::env::remove_var("UNIFUNCS_API_KEY");
        }
        if let Some(key) = original {
            unsafe {
                std::env::set_var("UNIFUNCS_API_KEY", key);
            }
        }
    }
}
