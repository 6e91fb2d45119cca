//! Vendor reference list.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Header of the column holding vendor names.
pub const VENDOR_COLUMN: &str = "Vendors";

#[derive(Debug, Error)]
pub enum VendorListError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Vendor list has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Load vendor names from a CSV file. Read fresh on every call.
pub fn load_vendor_list(path: &Path) -> Result<Vec<String>, VendorListError> {
    let file = std::fs::File::open(path).map_err(|source| VendorListError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_vendor_list(file)
}

/// Read vendor names from the `Vendors` column, skipping blank cells.
pub fn read_vendor_list<R: Read>(reader: R) -> Result<Vec<String>, VendorListError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let idx = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == VENDOR_COLUMN)
        .ok_or(VendorListError::MissingColumn(VENDOR_COLUMN))?;

    let mut vendors = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(idx).map(str::trim).filter(|s| !s.is_empty()) {
            vendors.push(name.to_string());
        }
    }
    Ok(vendors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_vendor_list() {
        let csv = "Category,Vendors\nsurvey,qualtrics\ncms, cascade \nemail,\nmail,e2ma\n";
        let vendors = read_vendor_list(csv.as_bytes()).unwrap();
        assert_eq!(vendors, vec!["qualtrics", "cascade", "e2ma"]);
    }

    #[test]
    fn test_missing_column() {
        let err = read_vendor_list("Name\nqualtrics\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VendorListError::MissingColumn("Vendors")));
    }

    #[test]
    fn test_missing_file() {
        let err = load_vendor_list(Path::new("/nonexistent/vendors.csv")).unwrap_err();
        assert!(matches!(err, VendorListError::Io { .. }));
    }
}
