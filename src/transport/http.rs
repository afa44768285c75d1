//! `reqwest`-based transport.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;

use crate::config::ClientConfig;
use crate::error::{ApiError, CoinbaseError};
use crate::request::ApiRequest;
use crate::transport::{RequestSigner, Transport};

/// HTTP transport for the Coinbase Exchange REST API.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_exchange_client::transport::{HttpTransport, Transport};
/// use coinbase_exchange_client::request::ApiRequest;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let transport = HttpTransport::builder().sandbox().build()?;
///     let body = transport.perform(&ApiRequest::get("/currencies")).await?;
///     println!("{}", body);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
    base_url: String,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl HttpTransport {
    /// Create a transport for the production API with default settings.
    pub fn new() -> Result<Self, CoinbaseError> {
        Self::builder().build()
    }

    /// Create a new transport builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn perform(&self, request: &ApiRequest) -> Result<String, CoinbaseError> {
        let path = request.path_and_query();
        let url = format!("{}{}", self.base_url, path);
        let body = request.body_json();

        let unknown = request.unknown_keys();
        if !unknown.is_empty() {
            tracing::debug!(
                path = %request.path,
                ?unknown,
                "forwarding parameters outside the documented allow-list"
            );
        }
        tracing::debug!(method = %request.method, %path, "sending request");

        let mut builder = self.http_client.request(request.method.clone(), &url);
        if let Some(signer) = &self.signer {
            let headers = signer.sign(&request.method, &path, body.as_deref().unwrap_or(""))?;
            builder = builder.headers(headers);
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), %path, "request rejected");
            return Err(CoinbaseError::Api(ApiError::from_body(status.as_u16(), &text)));
        }
        Ok(text)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}

/// Builder for [`HttpTransport`].
pub struct HttpTransportBuilder {
    config: ClientConfig,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl HttpTransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            signer: None,
        }
    }

    /// Replace all settings with the given configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Target the public sandbox.
    pub fn sandbox(mut self) -> Self {
        self.config.base_url = crate::rest::SANDBOX_BASE_URL.to_string();
        self
    }

    /// Set the signer supplying authentication headers.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport, CoinbaseError> {
        let base_url = self.config.validated_base_url()?;

        let mut headers = HeaderMap::new();
        let user_agent = self
            .config
            .user_agent
            .unwrap_or_else(|| format!("coinbase-exchange-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("coinbase-exchange-client"));
        headers.insert(USER_AGENT, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.config.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(self.config.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(HttpTransport {
            http_client: client,
            base_url,
            signer: self.signer,
        })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
