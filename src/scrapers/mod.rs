//! Fetchers for the external sources used to enrich the roster.

mod encyclopedia;
mod extract;
mod http_client;
mod social;
mod throttle;
mod vendor_probe;

pub use encyclopedia::{parse_infobox, EncyclopediaFetcher, DEFAULT_ENCYCLOPEDIA_SEARCH_URL};
pub use extract::{extract_number, find_number};
pub use http_client::{resolve_user_agent, HttpClient, ProbeOutcome, BROWSER_USER_AGENT};
pub use social::{parse_social_page, SocialFetcher, DEFAULT_SOCIAL_BASE_URL};
pub use throttle::Throttle;
pub use vendor_probe::{candidate_urls, normalize_host, UrlProbe, VendorProber};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Field, ScrapeResult, University};

/// Classified fetch failures.
///
/// Only `NetworkUnavailable` is ever recovered from (by the vendor prober);
/// every other variant aborts the job.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network unavailable for {url}: {message}")]
    NetworkUnavailable { url: String, message: String },

    #[error("Could not extract {what} from {text:?}")]
    ParseMismatch { what: String, text: String },

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Classify a transport error. Connection failures (refused, reset,
    /// unresolvable host) become `NetworkUnavailable`.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_connect() {
            FetchError::NetworkUnavailable {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            FetchError::Http {
                url: url.to_string(),
                source: err,
            }
        }
    }

    pub fn is_network_unavailable(&self) -> bool {
        matches!(self, FetchError::NetworkUnavailable { .. })
    }
}

/// A source that enriches one roster row at a time.
#[async_trait]
pub trait RowFetcher: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Every field this fetcher may populate.
    fn fields(&self) -> &'static [Field];

    /// Fetch values for one row. `Ok(None)` means the row lacks the input
    /// this fetcher needs.
    async fn fetch(&self, univ: &University) -> Result<Option<ScrapeResult>, FetchError>;
}
