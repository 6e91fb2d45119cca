//! Known roster columns.

use std::fmt;
use std::str::FromStr;

/// A roster column with fixed meaning.
///
/// Anything not listed here is carried through untouched as an extra column
/// (vendor columns included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    SocialHandle,
    Students,
    AcademicStaff,
    AdministrativeStaff,
    InstitutionType,
    Website,
    Likes,
    Follows,
    ScrapedAt,
}

impl Field {
    /// Every known field, in canonical column order.
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::SocialHandle,
        Field::Students,
        Field::AcademicStaff,
        Field::AdministrativeStaff,
        Field::InstitutionType,
        Field::Website,
        Field::Likes,
        Field::Follows,
        Field::ScrapedAt,
    ];

    /// Column header used in the persisted CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::SocialHandle => "fblink",
            Field::Students => "Students",
            Field::AcademicStaff => "Academic staff",
            Field::AdministrativeStaff => "Administrative staff",
            Field::InstitutionType => "Type",
            Field::Website => "Website",
            Field::Likes => "fblikes",
            Field::Follows => "fbfollows",
            Field::ScrapedAt => "date",
        }
    }

    /// Look up a field by its column header.
    pub fn from_column(column: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.column() == column)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_column(s).ok_or_else(|| format!("Unknown roster column '{}'", s))
    }
}
