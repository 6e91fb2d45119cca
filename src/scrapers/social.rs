//! Facebook page like/follow counts.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use scraper::{Html, Selector};
use tracing::{debug, info};

use super::extract::extract_number;
use super::{FetchError, HttpClient, RowFetcher, Throttle};
use crate::models::{Field, ScrapeResult, University, SCRAPED_AT_FORMAT};

/// Default profile base URL; the handle is appended as a path segment.
pub const DEFAULT_SOCIAL_BASE_URL: &str = "https://www.facebook.com/";

const FIELDS: &[Field] = &[Field::Likes, Field::Follows, Field::ScrapedAt];

/// Container holding the community summary blocks.
static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div._4bl9").expect("valid selector"));
static INNER_DIV_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div").expect("valid selector"));

/// Fetches like/follow counts from a public profile page.
pub struct SocialFetcher {
    client: HttpClient,
    base_url: String,
    throttle: Throttle,
    verbose: bool,
}

impl SocialFetcher {
    pub fn new(client: HttpClient, base_url: &str, throttle: Throttle, verbose: bool) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            throttle,
            verbose,
        }
    }

    /// Profile URL for a handle.
    pub fn profile_url(&self, handle: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/{}", base, handle.trim_start_matches('/'))
    }

    /// Fetch and parse one profile, then sleep for the throttle delay.
    ///
    /// The delay is applied whether or not the fetch succeeded.
    pub async fn fetch_profile(&self, handle: &str) -> Result<ScrapeResult, FetchError> {
        let url = self.profile_url(handle);
        if self.verbose {
            println!("Getting {}", url);
        }

        let result = match self.client.get_text(&url).await {
            Ok(html) => parse_social_page(&html, Local::now().naive_local()),
            Err(e) => Err(e),
        };

        self.throttle.pause().await;
        result
    }
}

#[async_trait]
impl RowFetcher for SocialFetcher {
    fn name(&self) -> &'static str {
        "social"
    }

    fn fields(&self) -> &'static [Field] {
        FIELDS
    }

    async fn fetch(&self, univ: &University) -> Result<Option<ScrapeResult>, FetchError> {
        let Some(handle) = univ.social_handle.as_deref() else {
            info!(
                "No social handle for {}, skipping",
                univ.name.as_deref().unwrap_or("<unnamed>")
            );
            return Ok(None);
        };
        self.fetch_profile(handle).await.map(Some)
    }
}

/// Extract like/follow counts from a profile page.
///
/// `now` is stamped into `date` when either count was found.
pub fn parse_social_page(html: &str, now: NaiveDateTime) -> Result<ScrapeResult, FetchError> {
    let document = Html::parse_document(html);
    let mut result = ScrapeResult::with_fields(FIELDS);

    for block in document.select(&BLOCK_SELECTOR) {
        let Some(inner) = block.select(&INNER_DIV_SELECTOR).next() else {
            continue;
        };
        let text: String = inner.text().collect();

        if text.contains("like this") {
            result.set(Field::Likes, extract_number(&text)?);
        }
        if text.contains("follow this") {
            result.set(Field::Follows, extract_number(&text)?);
        }
    }

    if result.is_set(Field::Likes) || result.is_set(Field::Follows) {
        result.set(Field::ScrapedAt, now.format(SCRAPED_AT_FORMAT).to_string());
    } else {
        debug!("No like/follow blocks found");
    }

    Ok(result)
}
