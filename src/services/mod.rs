//! The enrichment job and the vendor pass.

mod enrich;
mod selector;
mod vendor_scan;

pub use enrich::{EnrichSummary, Enricher};
pub use selector::{select_rows, DEFAULT_BATCH_SIZE};
pub use vendor_scan::{vendor_column, VendorScan, VendorScanSummary};

use thiserror::Error;

use crate::repository::{RosterError, VendorListError};
use crate::scrapers::FetchError;

/// Errors that abort a job. Progress saved before the error is kept.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    VendorList(#[from] VendorListError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
