//! End-to-end enrichment runs against mock sources.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::tempdir;
use wiremock::MockServer;

use univscrape::models::{Field, ScrapeResult, University};
use univscrape::repository::Roster;
use univscrape::scrapers::{FetchError, RowFetcher};
use univscrape::services::{Enricher, JobError};

use common::{infobox_page, mock_settings, mount_profile, mount_search, social_page, write_roster};

#[tokio::test]
async fn test_enrich_fills_stats_and_metrics() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Example University",
        infobox_page("31,402 (Fall 2019)", "Public research university", "www.example.edu"),
    )
    .await;
    mount_search(
        &server,
        "Other College",
        infobox_page("2,050", "Liberal arts college", "other.edu"),
    )
    .await;
    mount_profile(&server, "exampleu", social_page("12,345", "13,001")).await;

    let dir = tempdir().unwrap();
    let path = write_roster(
        dir.path(),
        "Name,fblink,Country\nExample University,exampleu,US\nOther College,,CA\n",
    );
    let settings = mock_settings(&server, &path);

    let mut roster = Roster::load(&path).unwrap();
    let summary = Enricher::from_settings(&settings, false)
        .unwrap()
        .run(&mut roster, &path)
        .await
        .unwrap();
    assert_eq!(summary.rows, vec![0, 1]);

    let saved = Roster::load(&path).unwrap();
    for field in Field::ALL {
        assert!(saved.has_column(field.column()), "missing {}", field);
    }

    let first = saved.get(0).unwrap();
    assert_eq!(first.students.as_deref(), Some("31402"));
    assert_eq!(first.academic_staff.as_deref(), Some("1200"));
    assert_eq!(first.administrative_staff, None);
    assert_eq!(first.institution_type.as_deref(), Some("Public"));
    assert_eq!(first.website.as_deref(), Some("www.example.edu"));
    assert_eq!(first.likes.as_deref(), Some("12345"));
    assert_eq!(first.follows.as_deref(), Some("13001"));
    assert!(first.scraped_at_time().is_some());
    assert_eq!(first.cell("Country"), "US");

    // No handle: stats only, but the row is stamped as processed.
    let second = saved.get(1).unwrap();
    assert_eq!(second.students.as_deref(), Some("2050"));
    assert_eq!(second.institution_type, None);
    assert_eq!(second.website.as_deref(), Some("other.edu"));
    assert_eq!(second.likes, None);
    assert!(second.scraped_at_time().is_some());
    assert_eq!(second.cell("Country"), "CA");
}

#[tokio::test]
async fn test_dead_profile_does_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_search(&server, "Gone University", infobox_page("300", "Public", "gone.edu")).await;
    mount_search(&server, "Example University", infobox_page("100", "Private", "example.edu")).await;
    // Nothing mounted for "deadpage": the profile answers 404.
    mount_profile(&server, "exampleu", social_page("10", "20")).await;

    let dir = tempdir().unwrap();
    let path = write_roster(
        dir.path(),
        "Name,fblink\nGone University,deadpage\nExample University,exampleu\n",
    );
    let settings = mock_settings(&server, &path);

    let mut roster = Roster::load(&path).unwrap();
    let summary = Enricher::from_settings(&settings, false)
        .unwrap()
        .run(&mut roster, &path)
        .await
        .unwrap();
    assert_eq!(summary.rows, vec![0, 1]);

    let saved = Roster::load(&path).unwrap();
    let gone = saved.get(0).unwrap();
    assert_eq!(gone.students.as_deref(), Some("300"));
    assert_eq!(gone.likes, None);
    assert!(!gone.is_unscraped());

    let next = saved.get(1).unwrap();
    assert_eq!(next.students.as_deref(), Some("100"));
    assert_eq!(next.likes.as_deref(), Some("10"));
}

#[tokio::test]
async fn test_refresh_without_counts_clears_metrics_and_restamps() {
    let server = MockServer::start().await;
    mount_search(&server, "Example University", infobox_page("100", "Private", "example.edu")).await;
    mount_profile(&server, "exampleu", "<html><body><p>Log in</p></body></html>".to_string()).await;

    let dir = tempdir().unwrap();
    let path = write_roster(
        dir.path(),
        "Name,fblink,fblikes,fbfollows,date\nExample University,exampleu,900,950,2020-01-01 00:00\n",
    );
    let settings = mock_settings(&server, &path);

    let mut roster = Roster::load(&path).unwrap();
    Enricher::from_settings(&settings, false)
        .unwrap()
        .run(&mut roster, &path)
        .await
        .unwrap();

    let saved = Roster::load(&path).unwrap();
    let row = saved.get(0).unwrap();
    assert_eq!(row.likes, None);
    assert_eq!(row.follows, None);
    assert_ne!(row.scraped_at.as_deref(), Some("2020-01-01 00:00"));
    assert!(row.scraped_at_time().is_some());
}

#[tokio::test]
async fn test_missing_search_result_aborts_after_checkpoint() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Example University",
        infobox_page("100", "Private", "example.edu"),
    )
    .await;
    mount_profile(&server, "exampleu", social_page("10", "20")).await;
    // Nothing mounted for "Missing College": the server answers 404.

    let dir = tempdir().unwrap();
    let path = write_roster(
        dir.path(),
        "Name,fblink\nExample University,exampleu\nMissing College,missingc\n",
    );
    let settings = mock_settings(&server, &path);

    let mut roster = Roster::load(&path).unwrap();
    let err = Enricher::from_settings(&settings, false)
        .unwrap()
        .run(&mut roster, &path)
        .await
        .unwrap_err();
    assert!(matches!(err, JobError::Fetch(FetchError::NotFound(_))));

    let saved = Roster::load(&path).unwrap();
    assert_eq!(saved.get(0).unwrap().likes.as_deref(), Some("10"));
    assert!(!saved.get(0).unwrap().is_unscraped());
    assert!(saved.get(1).unwrap().is_unscraped());
}

#[tokio::test]
async fn test_page_without_number_aborts() {
    let server = MockServer::start().await;
    mount_search(&server, "Example University", infobox_page("100", "Private", "example.edu")).await;
    mount_profile(&server, "exampleu", social_page("Many", "20")).await;

    let dir = tempdir().unwrap();
    let path = write_roster(dir.path(), "Name,fblink\nExample University,exampleu\n");
    let settings = mock_settings(&server, &path);

    let mut roster = Roster::load(&path).unwrap();
    let err = Enricher::from_settings(&settings, false)
        .unwrap()
        .run(&mut roster, &path)
        .await
        .unwrap_err();
    assert!(matches!(err, JobError::Fetch(FetchError::ParseMismatch { .. })));
}

/// Stamps rows with strictly increasing timestamps.
struct ClockFetcher {
    tick: AtomicUsize,
}

#[async_trait]
impl RowFetcher for ClockFetcher {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn fields(&self) -> &'static [Field] {
        &[Field::ScrapedAt]
    }

    async fn fetch(&self, _univ: &University) -> Result<Option<ScrapeResult>, FetchError> {
        let n = self.tick.fetch_add(1, Ordering::SeqCst);
        let mut result = ScrapeResult::with_fields(self.fields());
        result.set(
            Field::ScrapedAt,
            format!("2024-01-01 {:02}:{:02}", n / 60, n % 60),
        );
        Ok(Some(result))
    }
}

#[tokio::test]
async fn test_repeated_runs_rotate_through_roster() {
    let dir = tempdir().unwrap();
    let mut csv = String::from("Name,fblink\n");
    for i in 0..60 {
        csv.push_str(&format!("Univ {},u{}\n", i, i));
    }
    let path = write_roster(dir.path(), &csv);

    let enricher = Enricher::new(50).with_fetcher(ClockFetcher {
        tick: AtomicUsize::new(0),
    });

    let mut roster = Roster::load(&path).unwrap();
    let first = enricher.run(&mut roster, &path).await.unwrap();
    assert_eq!(first.rows, (0..50).collect::<Vec<_>>());

    let mut roster = Roster::load(&path).unwrap();
    let second = enricher.run(&mut roster, &path).await.unwrap();
    assert_eq!(second.rows, (50..60).collect::<Vec<_>>());

    let mut roster = Roster::load(&path).unwrap();
    assert!(roster.rows().iter().all(|u| !u.is_unscraped()));
    let third = enricher.run(&mut roster, &path).await.unwrap();
    assert_eq!(third.rows, (0..50).collect::<Vec<_>>());

    // Rows 50..59 are now the oldest.
    let roster = Roster::load(&path).unwrap();
    let fourth = univscrape::services::select_rows(&roster, 10);
    assert_eq!(fourth, (50..60).collect::<Vec<_>>());
}
