//! HTTP client shared by the fetchers and the vendor prober.

mod user_agent;

pub use user_agent::{resolve_user_agent, BROWSER_USER_AGENT};

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::FetchError;

/// Result of probing a URL that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The URL answered directly.
    Reached,
    /// The URL answered only after redirecting elsewhere.
    Redirected { final_url: String },
}

/// HTTP client with a fixed user agent and request timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the default browser user agent.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(timeout, None)
    }

    /// Create a new HTTP client with custom user agent configuration.
    /// - None: default browser user agent
    /// - Some("impersonate"): random real browser user agent
    /// - Some(custom): custom user agent string
    pub fn with_user_agent(
        timeout: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Get page content as text.
    ///
    /// The body is returned for every status; error pages are parsed like
    /// any other page.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        debug!("{} {} in {:?}", status.as_u16(), url, start.elapsed());

        if !status.is_success() {
            warn!("Unexpected status {} for {}", status, url);
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }

    /// GET a URL and report whether it answered without a redirect.
    ///
    /// Any HTTP status counts as an answer; only the redirect chain matters.
    pub async fn probe(&self, url: &str) -> Result<ProbeOutcome, FetchError> {
        debug!("Probing {}", url);
        let requested = Url::parse(url).map_err(|e| FetchError::ParseMismatch {
            what: format!("URL ({})", e),
            text: url.to_string(),
        })?;

        let response = self
            .client
            .get(requested.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if response.url() == &requested {
            Ok(ProbeOutcome::Reached)
        } else {
            Ok(ProbeOutcome::Redirected {
                final_url: response.url().to_string(),
            })
        }
    }
}
