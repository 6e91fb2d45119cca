//! univscrape - university roster enrichment.
//!
//! Fills a roster CSV with encyclopedia infobox statistics and social page
//! metrics, and records which SaaS vendors host a page for each institution.

pub mod cli;
pub mod config;
pub mod models;
pub mod repository;
pub mod scrapers;
pub mod services;
