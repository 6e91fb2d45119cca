//! SaaS vendor detection by probing vendor-prefixed subdomains.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{FetchError, HttpClient, ProbeOutcome};
use crate::models::VendorStatus;

/// Something that can check whether a URL answers.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome, FetchError>;
}

#[async_trait]
impl UrlProbe for HttpClient {
    async fn probe(&self, url: &str) -> Result<ProbeOutcome, FetchError> {
        HttpClient::probe(self, url).await
    }
}

/// Host part of a website value: leading `https://` and `www.` removed.
pub fn normalize_host(website: &str) -> &str {
    let host = website.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    host.strip_prefix("www.").unwrap_or(host)
}

/// Candidate vendor URLs for a website, or `None` if the website is not a
/// usable `.edu`-style value.
///
/// For `qualtrics` and `https://www.example.edu` this yields
/// `https://qualtrics.example.edu` and `https://example.qualtrics.edu`.
pub fn candidate_urls(vendor: &str, website: &str) -> Option<(String, String)> {
    let host = normalize_host(website);
    if host.is_empty() || !website.contains("edu") {
        return None;
    }

    let prefixed = format!("https://{}.{}", vendor, host);

    let mut labels: Vec<&str> = host.split('.').collect();
    labels.insert(1, vendor);
    let spliced = format!("https://{}", labels.join("."));

    Some((prefixed, spliced))
}

/// Checks every roster website against a vendor.
pub struct VendorProber<P: UrlProbe> {
    probe: P,
    verbose: bool,
}

impl<P: UrlProbe> VendorProber<P> {
    pub fn new(probe: P, verbose: bool) -> Self {
        Self { probe, verbose }
    }

    /// Probe one website for one vendor.
    ///
    /// Connection failures move on to the next candidate and finally to
    /// `Absent`; any other error is returned.
    pub async fn probe_site(
        &self,
        vendor: &str,
        website: Option<&str>,
    ) -> Result<VendorStatus, FetchError> {
        let Some((prefixed, spliced)) = website.and_then(|w| candidate_urls(vendor, w)) else {
            return Ok(VendorStatus::Absent);
        };

        if self.verbose {
            println!("Checking ... {} {}", prefixed, spliced);
        }

        for candidate in [prefixed, spliced] {
            match self.probe.probe(&candidate).await {
                Ok(ProbeOutcome::Reached) => {
                    info!("Found {} for {}", candidate, vendor);
                    return Ok(VendorStatus::Matched(candidate));
                }
                Ok(ProbeOutcome::Redirected { final_url }) => {
                    if self.verbose {
                        println!("Request was redirected");
                    }
                    debug!("{} redirected to {}", candidate, final_url);
                    return Ok(VendorStatus::Absent);
                }
                Err(e) if e.is_network_unavailable() => {
                    debug!("{} not reachable: {}", candidate, e);
                }
                Err(e) => return Err(e),
            }
        }

        if self.verbose {
            println!("Vendor {} not found", vendor);
        }
        Ok(VendorStatus::Absent)
    }
}
