//! Wikipedia infobox statistics.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use super::extract::find_number;
use super::{FetchError, HttpClient, RowFetcher};
use crate::models::{Field, ScrapeResult, University};

/// Default full-text search endpoint.
pub const DEFAULT_ENCYCLOPEDIA_SEARCH_URL: &str = "https://en.wikipedia.org/w/index.php";

const FIELDS: &[Field] = &[
    Field::Students,
    Field::AcademicStaff,
    Field::AdministrativeStaff,
    Field::InstitutionType,
    Field::Website,
];

/// Count fields and the infobox label each is read from.
const COUNT_LABELS: &[(Field, &str)] = &[
    (Field::Students, "Students"),
    (Field::AcademicStaff, "Academic staff"),
    (Field::AdministrativeStaff, "Administrative staff"),
];

const TYPE_LABEL: &str = "Type";
const WEBSITE_LABEL: &str = "Website";

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table tr").expect("valid selector"));
static TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(private|public)").expect("valid type pattern"));

/// Fetches institution statistics by searching the encyclopedia.
pub struct EncyclopediaFetcher {
    client: HttpClient,
    search_url: String,
    verbose: bool,
}

impl EncyclopediaFetcher {
    pub fn new(client: HttpClient, search_url: &str, verbose: bool) -> Self {
        Self {
            client,
            search_url: search_url.to_string(),
            verbose,
        }
    }

    /// Search URL for a quoted institution name.
    pub fn search_url(&self, name: &str) -> String {
        let quoted = format!("\"{}\"", name);
        format!("{}?search={}", self.search_url, urlencoding::encode(&quoted))
    }

    /// Search for an institution and parse its infobox.
    pub async fn fetch_stats(&self, name: &str) -> Result<ScrapeResult, FetchError> {
        let url = self.search_url(name);
        if self.verbose {
            println!("Getting {}", url);
        }
        let html = self.client.get_text(&url).await?;
        parse_infobox(&html)
    }
}

#[async_trait]
impl RowFetcher for EncyclopediaFetcher {
    fn name(&self) -> &'static str {
        "encyclopedia"
    }

    fn fields(&self) -> &'static [Field] {
        FIELDS
    }

    async fn fetch(&self, univ: &University) -> Result<Option<ScrapeResult>, FetchError> {
        let Some(name) = univ.name.as_deref() else {
            info!("Row has no name, skipping encyclopedia lookup");
            return Ok(None);
        };
        self.fetch_stats(name).await.map(Some)
    }
}

/// Label/value pairs from every table row, in document order.
fn table_rows(document: &Html) -> Vec<(String, String)> {
    document
        .select(&ROW_SELECTOR)
        .filter_map(|row| {
            let mut cells = row
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| matches!(el.value().name(), "th" | "td"))
                .map(|el| cell_text(&el));
            let label = cells.next()?;
            let value = cells.next().unwrap_or_default();
            Some((label, value))
        })
        .collect()
}

/// Cell text with whitespace runs collapsed.
fn cell_text(el: &ElementRef) -> String {
    el.text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup<'a>(rows: &'a [(String, String)], label: &str) -> Option<&'a str> {
    rows.iter()
        .find(|(l, _)| l == label)
        .map(|(_, v)| v.as_str())
}

/// Extract infobox statistics from a search result page.
///
/// Count rows fall back to the raw cell text when no number is present and
/// are missing when the row is absent. A page without tables, or without a
/// `Website` row, is an error.
pub fn parse_infobox(html: &str) -> Result<ScrapeResult, FetchError> {
    let document = Html::parse_document(html);
    let rows = table_rows(&document);
    if rows.is_empty() {
        return Err(FetchError::NotFound("tables in search result".to_string()));
    }

    let mut result = ScrapeResult::with_fields(FIELDS);

    for (field, label) in COUNT_LABELS {
        match lookup(&rows, label) {
            Some(cell) => {
                let value = find_number(cell).unwrap_or_else(|| cell.to_string());
                result.set(*field, value);
            }
            None => {
                debug!("No '{}' row", label);
                result.clear(*field);
            }
        }
    }

    let institution_type = lookup(&rows, TYPE_LABEL)
        .and_then(|cell| TYPE_PATTERN.find(cell))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    result.set(Field::InstitutionType, institution_type);

    let website = lookup(&rows, WEBSITE_LABEL)
        .ok_or_else(|| FetchError::NotFound(format!("'{}' row", WEBSITE_LABEL)))?;
    result.set(Field::Website, website);

    Ok(result)
}
