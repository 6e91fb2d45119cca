//! Vendor probe outcomes as stored in vendor columns.

/// Cell value recorded when a vendor probe is skipped or finds nothing.
pub const ABSENCE_MARKER: &str = "NA";

/// State of one vendor column cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorStatus {
    /// Cell is empty; the vendor has not been checked for this row.
    NotChecked,
    /// Probe was skipped or found nothing.
    Absent,
    /// Probe reached this vendor URL without being redirected.
    Matched(String),
}

impl VendorStatus {
    /// Interpret a raw cell value.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "" => VendorStatus::NotChecked,
            ABSENCE_MARKER => VendorStatus::Absent,
            url => VendorStatus::Matched(url.to_string()),
        }
    }

    /// Value to write into the CSV cell.
    pub fn as_cell(&self) -> &str {
        match self {
            VendorStatus::NotChecked => "",
            VendorStatus::Absent => ABSENCE_MARKER,
            VendorStatus::Matched(url) => url,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, VendorStatus::Matched(_))
    }
}
