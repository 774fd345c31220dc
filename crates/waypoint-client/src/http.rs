//! HTTP transport for the Waypoint stats service
//!
//! [`HttpClient`] performs exactly one outbound attempt per call and hands
//! back the raw status/body pair. Response classification (envelope status
//! codes, success allow-list) is deliberately left to the caller so that a
//! caching layer can decide between refresh and fallback on its own terms.

use std::time::Duration;

use tracing::{debug, trace};
use url::Url;

use crate::{Endpoint, Error, Result, Title};

/// Default base URL for the mobile stats service
const DEFAULT_BASE_URL: &str = "https://mobile-service-ssl.halo.xbox.com";

/// Consumer key segment the public stats endpoints are registered under
const DEFAULT_API_KEY: &str = "waypoint";

/// Outbound request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw result of one outbound call: the HTTP status and the undecoded body
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body text
    pub body: String,
}

impl RawResponse {
    /// Whether the transport-level status is a plain 200
    pub fn is_http_ok(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client for the Waypoint stats service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    title: Title,
    base_url: String,
    api_key: String,
    user_agent: Option<String>,
}

impl HttpClient {
    /// Create a new client for the given title
    pub fn new(title: Title) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self::with_client(client, title))
    }

    /// Create a new client with a custom reqwest client
    pub fn with_client(client: reqwest::Client, title: Title) -> Self {
        Self {
            client,
            title,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            user_agent: None,
        }
    }

    /// Override the base URL (primarily for pointing tests at a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|_| Error::InvalidBaseUrl(base_url.clone()))?;

        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set a custom user agent string
    ///
    /// If not set, reqwest's default user agent will be used.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Get the title this client is scoped to
    pub fn title(&self) -> Title {
        self.title
    }

    /// Render the full URL for an endpoint
    ///
    /// The service root embeds the title twice, once as a path segment and
    /// once in the service name: `{base}/{game}/{game}apijson.svc/{path}`.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        let game = self.title.as_str();
        format!(
            "{}/{game}/{game}apijson.svc/{}",
            self.base_url,
            endpoint.path(&self.api_key)
        )
    }

    /// Perform a single GET against the endpoint
    ///
    /// Exactly one attempt is made; connection and timeout errors surface
    /// as [`Error::Http`] without any retry or backoff.
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<RawResponse> {
        let url = self.endpoint_url(endpoint);
        debug!("Waypoint request to {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(ref user_agent) = self.user_agent {
            request = request.header("User-Agent", user_agent);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        trace!("Response status: {}", status);

        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
