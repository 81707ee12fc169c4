//! Building records and the immutable catalog they live in.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// One row of the building catalog.
///
/// Every field is plain text; an empty string means the value is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub campus_kr: String,
    pub campus_en: String,
    pub name_kr: String,
    pub name_en: String,
    pub map_link: String,
    /// Comma-separated abbreviations and aliases.
    pub nickname: String,
    pub code: String,
}

impl BuildingRecord {
    /// Trimmed, non-empty pieces of the nickname list.
    pub fn nicknames(&self) -> impl Iterator<Item = &str> {
        self.nickname
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
    }
}

/// Read-only set of building records, shared cheaply across requests.
///
/// Record order is the source file's row order and decides ties in the matcher.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Arc<[BuildingRecord]>,
}

impl Catalog {
    #[must_use]
    pub fn new(records: Vec<BuildingRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[BuildingRecord] {
        &self.records
    }
}

impl Deref for Catalog {
    type Target = [BuildingRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<BuildingRecord>> for Catalog {
    fn from(records: Vec<BuildingRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BuildingRecord;
    type IntoIter = std::slice::Iter<'a, BuildingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nicknames_are_trimmed_and_skip_blanks() {
        let record = BuildingRecord {
            nickname: " 하나, HanaSquare ,,".to_string(),
            ..BuildingRecord::default()
        };
        let pieces: Vec<&str> = record.nicknames().collect();
        assert_eq!(pieces, vec!["하나", "HanaSquare"]);
    }

    #[test]
    fn catalog_clones_share_records() {
        let catalog = Catalog::new(vec![BuildingRecord {
            code: "141".to_string(),
            ..BuildingRecord::default()
        }]);
        let clone = catalog.clone();
        assert!(std::ptr::eq(catalog.records(), clone.records()));
        assert_eq!(clone.len(), 1);
    }
}
