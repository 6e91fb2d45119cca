//! Shared fixtures and mock servers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use univscrape::config::Settings;

/// Infobox page for a search result.
pub fn infobox_page(students: &str, kind: &str, website: &str) -> String {
    format!(
        r#"<html><body>
        <table class="infobox vcard">
          <tr><th>Type</th><td>{kind}</td></tr>
          <tr><th>Students</th><td>{students}</td></tr>
          <tr><th>Academic staff</th><td>1,200</td></tr>
          <tr><th>Website</th><td><a href="https://{website}">{website}</a></td></tr>
        </table>
        </body></html>"#
    )
}

/// Profile page with like/follow blocks.
pub fn social_page(likes: &str, follows: &str) -> String {
    format!(
        r#"<html><body>
        <div class="_4bl9"><div>{likes} people like this</div></div>
        <div class="_4bl9"><div>{follows} people follow this</div></div>
        </body></html>"#
    )
}

/// Serve an infobox page for a quoted search on `name`.
pub async fn mount_search(server: &MockServer, name: &str, html: String) {
    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .and(query_param("search", format!("\"{}\"", name)))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Serve a profile page for a handle.
pub async fn mount_profile(server: &MockServer, handle: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", handle)))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Settings pointed at a mock server, with no social delay.
pub fn mock_settings(server: &MockServer, roster_path: &Path) -> Settings {
    Settings {
        roster_path: roster_path.to_path_buf(),
        social_base_url: server.uri(),
        encyclopedia_search_url: format!("{}/w/index.php", server.uri()),
        social_delay_min_ms: 0,
        social_delay_max_ms: 0,
        request_timeout: 5,
        probe_timeout: 5,
        ..Settings::default()
    }
}

/// Write a roster file into `dir`.
pub fn write_roster(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("univ_data.csv");
    std::fs::write(&path, contents).unwrap();
    path
}
