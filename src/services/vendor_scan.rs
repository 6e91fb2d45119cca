//! Vendor pass over the whole roster, one vendor column at a time.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::JobError;
use crate::config::Settings;
use crate::models::VendorStatus;
use crate::repository::Roster;
use crate::scrapers::{HttpClient, UrlProbe, VendorProber};

/// Match counts per vendor, in the order probed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorScanSummary {
    pub vendors: Vec<(String, usize)>,
}

impl VendorScanSummary {
    pub fn total_matches(&self) -> usize {
        self.vendors.iter().map(|(_, n)| n).sum()
    }
}

/// Probes every website for every vendor and records one column per vendor.
pub struct VendorScan<P: UrlProbe> {
    prober: VendorProber<P>,
    show_progress: bool,
}

impl VendorScan<HttpClient> {
    /// Scanner backed by a real HTTP client using the probe timeout.
    pub fn from_settings(settings: &Settings, verbose: bool) -> Result<Self, JobError> {
        let client =
            HttpClient::with_user_agent(settings.probe_timeout(), settings.user_agent.as_deref())?;
        Ok(Self::new(VendorProber::new(client, verbose)))
    }
}

impl<P: UrlProbe> VendorScan<P> {
    pub fn new(prober: VendorProber<P>) -> Self {
        Self {
            prober,
            show_progress: true,
        }
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, len: usize, vendor: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(vendor.to_string());
        pb
    }

    /// Probe all vendors, saving the roster to `path` after each vendor column.
    ///
    /// An error other than an unreachable host stops the pass; the column in
    /// progress is lost, completed columns are already saved.
    pub async fn run(
        &self,
        roster: &mut Roster,
        vendors: &[String],
        path: &Path,
    ) -> Result<VendorScanSummary, JobError> {
        for vendor in vendors {
            Roster::check_vendor_name(vendor)?;
        }

        let mut summary = VendorScanSummary::default();

        for vendor in vendors {
            info!("Checking for vendor: {}", vendor);

            let websites: Vec<Option<String>> =
                roster.rows().iter().map(|u| u.website.clone()).collect();
            let pb = self.progress_bar(websites.len(), vendor);

            let mut statuses = Vec::with_capacity(websites.len());
            for website in &websites {
                let status = match self.prober.probe_site(vendor, website.as_deref()).await {
                    Ok(status) => status,
                    Err(e) => {
                        pb.abandon();
                        return Err(e.into());
                    }
                };
                statuses.push(status);
                pb.inc(1);
            }
            pb.finish_and_clear();

            let matches = statuses.iter().filter(|s| s.is_match()).count();
            roster.set_vendor_column(vendor, statuses)?;
            roster.save(path)?;

            info!("{}: {} of {} sites", vendor, matches, roster.len());
            summary.vendors.push((vendor.clone(), matches));
        }

        Ok(summary)
    }
}

/// Statuses for a vendor column, for reporting.
pub fn vendor_column(roster: &Roster, vendor: &str) -> Vec<VendorStatus> {
    roster.rows().iter().map(|u| u.vendor(vendor)).collect()
}
