//! Data models for the university roster.

mod field;
mod scrape_result;
mod university;
mod vendor;

pub use field::Field;
pub use scrape_result::ScrapeResult;
pub use university::{University, SCRAPED_AT_FORMAT};
pub use vendor::{VendorStatus, ABSENCE_MARKER};
