//! Row-by-row enrichment with a checkpoint after every row.

use std::path::Path;

use chrono::Local;
use tracing::info;

use super::{select_rows, JobError};
use crate::config::Settings;
use crate::models::{Field, ScrapeResult, SCRAPED_AT_FORMAT};
use crate::repository::Roster;
use crate::scrapers::{EncyclopediaFetcher, HttpClient, RowFetcher, SocialFetcher};

/// What one enrichment run touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Row indices processed, in order.
    pub rows: Vec<usize>,
}

/// Runs each fetcher over the selected rows and merges the results.
pub struct Enricher {
    fetchers: Vec<Box<dyn RowFetcher>>,
    batch_size: usize,
}

impl Enricher {
    /// An enricher with no fetchers.
    pub fn new(batch_size: usize) -> Self {
        Self {
            fetchers: Vec::new(),
            batch_size,
        }
    }

    /// The standard pipeline: encyclopedia stats, then social metrics.
    pub fn from_settings(settings: &Settings, verbose: bool) -> Result<Self, JobError> {
        let client =
            HttpClient::with_user_agent(settings.request_timeout(), settings.user_agent.as_deref())?;

        let encyclopedia =
            EncyclopediaFetcher::new(client.clone(), &settings.encyclopedia_search_url, verbose);
        let social = SocialFetcher::new(
            client,
            &settings.social_base_url,
            settings.social_throttle(),
            verbose,
        );

        Ok(Self::new(settings.batch_size)
            .with_fetcher(encyclopedia)
            .with_fetcher(social))
    }

    /// Append a fetcher; fetchers run in the order added.
    pub fn with_fetcher(mut self, fetcher: impl RowFetcher + 'static) -> Self {
        self.fetchers.push(Box::new(fetcher));
        self
    }

    /// Enrich the selected rows, saving the roster to `path` after each one.
    ///
    /// Every processed row ends up with a `date`: when no fetcher stamped it
    /// (no handle, no counts on the page) it is stamped with the current time
    /// so the next run moves on to other rows.
    ///
    /// A fetch error stops the run immediately; rows saved before it keep
    /// their new values.
    pub async fn run(&self, roster: &mut Roster, path: &Path) -> Result<EnrichSummary, JobError> {
        let selected = select_rows(roster, self.batch_size);
        info!("Selected {} of {} rows", selected.len(), roster.len());

        for fetcher in &self.fetchers {
            roster.ensure_fields(fetcher.fields());
        }
        roster.ensure_fields(&[Field::ScrapedAt]);

        let mut summary = EnrichSummary::default();
        let total = selected.len();

        for (n, index) in selected.into_iter().enumerate() {
            let Some(univ) = roster.get(index).cloned() else {
                continue;
            };
            info!(
                "[{}/{}] {}",
                n + 1,
                total,
                univ.name.as_deref().unwrap_or("<unnamed>")
            );

            for fetcher in &self.fetchers {
                if let Some(result) = fetcher.fetch(&univ).await? {
                    if !result.is_empty() {
                        roster.assign(index, &result)?;
                    }
                } else {
                    info!("{} fetcher skipped row {}", fetcher.name(), index);
                }
            }

            if roster.get(index).is_some_and(|u| u.is_unscraped()) {
                roster.assign(index, &processed_stamp())?;
            }

            roster.save(path)?;
            summary.rows.push(index);
        }

        Ok(summary)
    }
}

/// `date` for a row that was processed without any fetcher stamping it.
fn processed_stamp() -> ScrapeResult {
    let mut stamp = ScrapeResult::default();
    stamp.set(
        Field::ScrapedAt,
        Local::now().naive_local().format(SCRAPED_AT_FORMAT).to_string(),
    );
    stamp
}
