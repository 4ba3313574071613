//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::redirect::Policy;

use super::pacer::RequestPacer;
use super::retry::RetryConfig;
use crate::error::{NetworkError, Result};
use crate::fetcher::Fetcher;

/// Accept header sent for page requests.
pub const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Accept header sent for stylesheet requests.
pub const CSS_ACCEPT: &str = "text/css,*/*;q=0.1";

/// Browser-like user agent; some sites serve reduced markup to unknown agents.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
    "(KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Fontscope/",
    env!("CARGO_PKG_VERSION")
);

/// Configuration for the HTTP client.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
    /// Whether to enable cookie storage.
    pub cookies_enabled: bool,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// Minimum spacing between consecutive requests.
    pub request_delay: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            follow_redirects: true,
            max_redirects: 10,
            cookies_enabled: true,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            request_delay: Duration::from_secs(1),
            retry: RetryConfig {
                max_retries: 2,
                ..RetryConfig::default()
            },
        }
    }
}

/// Builder for creating an HTTP client with custom configuration.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Disable request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable redirect following.
    pub fn no_redirects(mut self) -> Self {
        self.config.follow_redirects = false;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Disable cookie storage.
    pub fn no_cookies(mut self) -> Self {
        self.config.cookies_enabled = false;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the minimum delay between requests.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.config.request_delay = delay;
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry.max_retries = max_retries;
        self
    }

    /// Set the complete retry policy.
    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Build the HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if self.config.follow_redirects {
            builder = builder.redirect(Policy::limited(self.config.max_redirects));
        } else {
            builder = builder.redirect(Policy::none());
        }

        if self.config.cookies_enabled {
            builder = builder.cookie_store(true);
        }

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(HeaderValue::from_str(ua)?);
        }

        let client = builder.build()?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                pacer: RequestPacer::new(self.config.request_delay),
                config: self.config,
            }),
        })
    }
}

/// Internal state for the HTTP client.
struct HttpClientInner {
    client: reqwest::Client,
    pacer: RequestPacer,
    config: HttpClientConfig,
}

/// HTTP client used for page and stylesheet fetches.
///
/// The client is cheaply cloneable and thread-safe. Clones share the same
/// connection pool, configuration and request pacing.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a client from a configuration.
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        HttpClientBuilder::from_config(config).build()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// GET `url` and return the body with its content type, retrying
    /// transient failures.
    pub async fn get_text(&self, url: &str, accept: &'static str) -> Result<(String, Option<String>)> {
        let parsed = url::Url::parse(url)?;
        let retry = &self.inner.config.retry;
        let mut attempt = 0;

        loop {
            self.inner.pacer.wait().await;
            match self.send(&parsed, accept).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && attempt < retry.max_retries => {
                    attempt += 1;
                    let delay = retry.delay_for(attempt);
                    tracing::warn!(
                        target: "fontscope_net::http",
                        "{} failed ({}), retry {}/{} in {:?}",
                        url,
                        err,
                        attempt,
                        retry.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send(&self, url: &url::Url, accept: &'static str) -> Result<(String, Option<String>)> {
        tracing::debug!(target: "fontscope_net::http", "GET {}", url);

        let response = self
            .inner
            .client
            .get(url.clone())
            .header(ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().map(str::to_string),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok((body, content_type))
    }
}

impl Fetcher for HttpClient {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let (body, _) = self.get_text(url, HTML_ACCEPT).await?;
        Ok(body)
    }

    async fn fetch_css(&self, url: &str) -> Result<String> {
        let (body, content_type) = self.get_text(url, CSS_ACCEPT).await?;
        if looks_like_css(content_type.as_deref(), &body) {
            Ok(body)
        } else {
            tracing::debug!(
                target: "fontscope_net::http",
                "rejecting {} as stylesheet ({:?})",
                url,
                content_type
            );
            Err(NetworkError::NotCss {
                url: url.to_string(),
                content_type,
            })
        }
    }
}

/// Whether a response should be treated as a stylesheet.
///
/// A `text/css` response always is. Anything else must at least contain
/// one of `@`, `{`, `}` or `font-family`.
pub fn looks_like_css(content_type: Option<&str>, body: &str) -> bool {
    let declared_css = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("text/css"))
        .unwrap_or(false);
    declared_css
        || body.contains('@')
        || body.contains('{')
        || body.contains('}')
        || body.contains("font-family")
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_heuristic() {
        assert!(looks_like_css(Some("text/css; charset=utf-8"), ""));
        assert!(looks_like_css(Some("TEXT/CSS"), "plain"));
        assert!(looks_like_css(Some("text/plain"), "a{color:red}"));
        assert!(looks_like_css(None, "@import 'x.css';"));
        assert!(!looks_like_css(Some("text/plain"), "hello world"));
        assert!(!looks_like_css(None, ""));
    }

    #[test]
    fn default_user_agent_is_browser_like() {
        assert!(DEFAULT_USER_AGENT.starts_with("Mozilla/5.0"));
        assert!(DEFAULT_USER_AGENT.contains("Fontscope/"));
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let result = HttpClient::builder().user_agent("bad\nagent").build();
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }
}
