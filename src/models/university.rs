//! University record model.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::{Field, VendorStatus};

/// Timestamp format of the `date` column (local time, minute precision).
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One roster row.
///
/// Known columns are typed fields; `None` means the cell is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct University {
    pub name: Option<String>,
    pub social_handle: Option<String>,
    pub students: Option<String>,
    pub academic_staff: Option<String>,
    pub administrative_staff: Option<String>,
    pub institution_type: Option<String>,
    pub website: Option<String>,
    pub likes: Option<String>,
    pub follows: Option<String>,
    pub scraped_at: Option<String>,
    /// Columns outside the known set (vendor columns and anything user-added).
    pub extra: HashMap<String, String>,
}

impl University {
    /// Create a record with just a name and social handle.
    pub fn new(name: &str, social_handle: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            social_handle: Some(social_handle.to_string()),
            ..Default::default()
        }
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::SocialHandle => &self.social_handle,
            Field::Students => &self.students,
            Field::AcademicStaff => &self.academic_staff,
            Field::AdministrativeStaff => &self.administrative_staff,
            Field::InstitutionType => &self.institution_type,
            Field::Website => &self.website,
            Field::Likes => &self.likes,
            Field::Follows => &self.follows,
            Field::ScrapedAt => &self.scraped_at,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::SocialHandle => &mut self.social_handle,
            Field::Students => &mut self.students,
            Field::AcademicStaff => &mut self.academic_staff,
            Field::AdministrativeStaff => &mut self.administrative_staff,
            Field::InstitutionType => &mut self.institution_type,
            Field::Website => &mut self.website,
            Field::Likes => &mut self.likes,
            Field::Follows => &mut self.follows,
            Field::ScrapedAt => &mut self.scraped_at,
        }
    }

    /// Get a known field value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Overwrite a known field. Empty strings are stored as missing.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value.filter(|v| !v.is_empty());
    }

    /// Cell value for any column, known or extra.
    pub fn cell(&self, column: &str) -> &str {
        match Field::from_column(column) {
            Some(field) => self.get(field).unwrap_or(""),
            None => self.extra.get(column).map(|s| s.as_str()).unwrap_or(""),
        }
    }

    /// Set any column from a raw cell value.
    pub fn set_cell(&mut self, column: &str, value: &str) {
        match Field::from_column(column) {
            Some(field) => self.set(field, Some(value.to_string())),
            None => {
                self.extra.insert(column.to_string(), value.to_string());
            }
        }
    }

    /// True if this row has never been stamped by the social fetcher.
    pub fn is_unscraped(&self) -> bool {
        self.scraped_at.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    /// Parsed scrape timestamp, if present and well-formed.
    pub fn scraped_at_time(&self) -> Option<NaiveDateTime> {
        self.scraped_at
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s.trim(), SCRAPED_AT_FORMAT).ok())
    }

    /// Vendor column state for this row.
    pub fn vendor(&self, vendor: &str) -> VendorStatus {
        VendorStatus::from_cell(self.cell(vendor))
    }
}
