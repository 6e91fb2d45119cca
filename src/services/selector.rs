//! Picks which roster rows to enrich this run.

use std::cmp::Ordering;

use crate::models::{Field, University};
use crate::repository::Roster;

/// Rows enriched per run unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Select up to `batch_size` row indices to enrich.
///
/// - No `date` column yet: the first `batch_size` rows.
/// - Some rows never stamped: the first `batch_size` of those.
/// - Otherwise: the `batch_size` oldest stamps, ascending.
pub fn select_rows(roster: &Roster, batch_size: usize) -> Vec<usize> {
    if !roster.has_column(Field::ScrapedAt.column()) {
        return (0..roster.len().min(batch_size)).collect();
    }

    let mut unscraped: Vec<usize> = roster
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, univ)| univ.is_unscraped())
        .map(|(i, _)| i)
        .collect();

    if !unscraped.is_empty() {
        unscraped.truncate(batch_size);
        return unscraped;
    }

    let rows = roster.rows();
    let mut oldest: Vec<usize> = (0..rows.len()).collect();
    oldest.sort_by(|&a, &b| compare_scraped_at(&rows[a], &rows[b]));
    oldest.truncate(batch_size);
    oldest
}

/// Order by parsed timestamp. Unparseable stamps sort first, by raw text.
fn compare_scraped_at(a: &University, b: &University) -> Ordering {
    let key = |u: &University| (u.scraped_at_time(), u.scraped_at.clone().unwrap_or_default());
    key(a).cmp(&key(b))
}
