//! CSV-backed university roster.

use std::io::{Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::{Field, ScrapeResult, University, VendorStatus};

/// Errors raised while reading, writing or updating the roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {index} out of range (roster has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Vendor '{0}' collides with a roster column")]
    ReservedVendor(String),

    #[error("Vendor column '{vendor}' has {got} values for {expected} rows")]
    ColumnLength {
        vendor: String,
        got: usize,
        expected: usize,
    },
}

/// Table of university records with its column order.
///
/// Columns are only ever added, never removed; the header order of the file
/// that was loaded is kept on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    columns: Vec<String>,
    rows: Vec<University>,
}

impl Roster {
    /// Build a roster from explicit columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<University>) -> Self {
        Self { columns, rows }
    }

    /// Load the roster from a CSV file with a header row.
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let file = std::fs::File::open(path)?;
        let roster = Self::from_reader(file)?;
        debug!(
            "Loaded roster {} ({} rows, {} columns)",
            path.display(),
            roster.len(),
            roster.columns.len()
        );
        Ok(roster)
    }

    /// Parse a roster from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut univ = University::default();
            for (column, value) in columns.iter().zip(record.iter()) {
                univ.set_cell(column, value);
            }
            rows.push(univ);
        }

        Ok(Self { columns, rows })
    }

    /// Overwrite the CSV file with the current roster.
    pub fn save(&self, path: &Path) -> Result<(), RosterError> {
        let file = std::fs::File::create(path)?;
        self.write_to(file)?;
        debug!("Saved roster {} ({} rows)", path.display(), self.len());
        Ok(())
    }

    /// Serialize the roster as CSV.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), RosterError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for univ in &self.rows {
            writer.write_record(self.columns.iter().map(|c| univ.cell(c)))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[University] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&University> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether a column exists in the header.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Append an empty column if it does not exist yet.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            debug!("Adding roster column '{}'", column);
            self.columns.push(column.to_string());
        }
    }

    /// Ensure every given known field has a column.
    pub fn ensure_fields(&mut self, fields: &[Field]) {
        for field in fields {
            self.ensure_column(field.column());
        }
    }

    /// Merge a fetcher result into one row.
    ///
    /// Creates missing columns and overwrites every cell the result names,
    /// including clearing cells whose value is missing.
    pub fn assign(&mut self, index: usize, result: &ScrapeResult) -> Result<(), RosterError> {
        let len = self.rows.len();
        if index >= len {
            return Err(RosterError::RowOutOfRange { index, len });
        }

        for field in result.fields() {
            self.ensure_column(field.column());
        }

        let univ = &mut self.rows[index];
        for (field, value) in result.iter() {
            univ.set(field, value.map(|v| v.to_string()));
        }
        Ok(())
    }

    /// Reject vendor names that would overwrite a known field.
    pub fn check_vendor_name(vendor: &str) -> Result<(), RosterError> {
        match Field::from_column(vendor) {
            Some(_) => Err(RosterError::ReservedVendor(vendor.to_string())),
            None => Ok(()),
        }
    }

    /// Replace a vendor column wholesale, one status per row.
    pub fn set_vendor_column(
        &mut self,
        vendor: &str,
        statuses: Vec<VendorStatus>,
    ) -> Result<(), RosterError> {
        Self::check_vendor_name(vendor)?;
        if statuses.len() != self.rows.len() {
            return Err(RosterError::ColumnLength {
                vendor: vendor.to_string(),
                got: statuses.len(),
                expected: self.rows.len(),
            });
        }

        self.ensure_column(vendor);
        for (univ, status) in self.rows.iter_mut().zip(statuses) {
            univ.set_cell(vendor, status.as_cell());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "Name,fblink,Country\n\
                          Example University,exampleu,US\n\
                          Other College,otherc,CA\n";

    #[test]
    fn test_from_reader() {
        let roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.columns(), &["Name", "fblink", "Country"]);
        assert_eq!(roster.rows()[0].name.as_deref(), Some("Example University"));
        assert_eq!(roster.rows()[1].social_handle.as_deref(), Some("otherc"));
        assert_eq!(roster.rows()[1].cell("Country"), "CA");
        assert!(!roster.has_column("date"));
    }

    #[test]
    fn test_short_rows_are_missing() {
        let roster = Roster::from_reader("Name,fblink,date\nSolo U\n".as_bytes()).unwrap();
        assert_eq!(roster.rows()[0].social_handle, None);
        assert!(roster.rows()[0].is_unscraped());
    }

    #[test]
    fn test_assign_creates_column() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut result = ScrapeResult::default();
        result.set(Field::InstitutionType, "Public");

        roster.assign(1, &result).unwrap();

        assert!(roster.has_column("Type"));
        assert_eq!(roster.rows()[1].institution_type.as_deref(), Some("Public"));
        assert_eq!(roster.rows()[0].institution_type, None);
    }

    #[test]
    fn test_assign_overwrites_without_residue() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();

        let mut first = ScrapeResult::default();
        first.set(Field::InstitutionType, "Public research university");
        roster.assign(0, &first).unwrap();

        let mut second = ScrapeResult::default();
        second.set(Field::InstitutionType, "Private");
        roster.assign(0, &second).unwrap();

        assert_eq!(roster.rows()[0].institution_type.as_deref(), Some("Private"));
        assert_eq!(roster.columns().iter().filter(|c| *c == "Type").count(), 1);
    }

    #[test]
    fn test_assign_missing_value_clears_cell() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut result = ScrapeResult::default();
        result.set(Field::Likes, "100");
        roster.assign(0, &result).unwrap();

        let cleared = ScrapeResult::with_fields(&[Field::Likes]);
        roster.assign(0, &cleared).unwrap();
        assert_eq!(roster.rows()[0].likes, None);
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        let err = roster.assign(5, &ScrapeResult::default()).unwrap_err();
        assert!(matches!(err, RosterError::RowOutOfRange { index: 5, len: 2 }));
    }

    #[test]
    fn test_vendor_column() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        roster
            .set_vendor_column(
                "qualtrics",
                vec![
                    VendorStatus::Matched("https://qualtrics.example.edu".into()),
                    VendorStatus::Absent,
                ],
            )
            .unwrap();
        assert_eq!(roster.columns().last().map(|s| s.as_str()), Some("qualtrics"));
        assert!(roster.rows()[0].vendor("qualtrics").is_match());
        assert_eq!(roster.rows()[1].vendor("qualtrics"), VendorStatus::Absent);

        let err = roster
            .set_vendor_column("cascade", vec![VendorStatus::Absent])
            .unwrap_err();
        assert!(matches!(err, RosterError::ColumnLength { .. }));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("univ_data.csv");

        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        let mut result = ScrapeResult::with_fields(&[Field::Likes, Field::ScrapedAt]);
        result.set(Field::Likes, "1234");
        result.set(Field::ScrapedAt, "2024-05-01 10:00");
        roster.assign(0, &result).unwrap();
        roster.save(&path).unwrap();

        let loaded = Roster::load(&path).unwrap();
        assert_eq!(loaded, roster);
        assert_eq!(
            loaded.columns(),
            &["Name", "fblink", "Country", "fblikes", "date"]
        );
        assert!(loaded.rows()[1].is_unscraped());
    }

    #[test]
    fn test_vendor_named_like_field_is_rejected() {
        let mut roster = Roster::from_reader(SAMPLE.as_bytes()).unwrap();
        let statuses = vec![VendorStatus::Absent, VendorStatus::Absent];
        let err = roster.set_vendor_column("date", statuses).unwrap_err();
        assert!(matches!(err, RosterError::ReservedVendor(ref v) if v == "date"));
        assert!(!roster.has_column("date"));
        assert!(roster.rows().iter().all(|u| u.is_unscraped()));
    }
}
