//! Per-row fetcher output.

use std::collections::BTreeMap;

use super::Field;

/// Values one fetcher extracted for one row.
///
/// Every field the fetcher declares is present; `None` means the value is
/// missing and will be written as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeResult {
    values: BTreeMap<Field, Option<String>>,
}

impl ScrapeResult {
    /// Create a result with every given field present and empty.
    pub fn with_fields(fields: &[Field]) -> Self {
        Self {
            values: fields.iter().map(|f| (*f, None)).collect(),
        }
    }

    /// Set a field value, adding the field if it was not declared.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, Some(value.into()));
    }

    /// Mark a field as explicitly missing.
    pub fn clear(&mut self, field: Field) {
        self.values.insert(field, None);
    }

    /// Value of a field, if set.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).and_then(|v| v.as_deref())
    }

    /// True if a field has been given a non-empty value.
    pub fn is_set(&self, field: Field) -> bool {
        self.get(field).is_some_and(|v| !v.is_empty())
    }

    /// True if the result carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        self.values.iter().map(|(f, v)| (*f, v.as_deref()))
    }
}
