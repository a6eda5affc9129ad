//! Label-name to class-id tables.
//!
//! A usable table must contain [`IGNORE_LABEL`], and for segmentation maps
//! its smallest value must be 0. Shapes whose label is absent from the
//! table are routed to the ignore class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LabelmaskError;

/// Reserved label that unknown labels and untouched pixels map to.
pub const IGNORE_LABEL: &str = "__ignore__";

/// Label given class 0 by [`LabelTable::from_labels`].
pub const BACKGROUND_LABEL: &str = "_background_";

/// A mapping from label name to class id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    values: BTreeMap<String, u32>,
}

impl LabelTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table giving [`BACKGROUND_LABEL`] class 0 and every other
    /// label the next free id in first-seen order.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::new();
        table.insert(BACKGROUND_LABEL, 0);
        for label in labels {
            if !table.contains(label) {
                let next = table.len() as u32;
                table.insert(label, next);
            }
        }
        table
    }

    /// Inserts or replaces the class id of `label`.
    pub fn insert(&mut self, label: impl Into<String>, value: u32) -> Option<u32> {
        self.values.insert(label.into(), value)
    }

    /// Sets the class id of `label`, builder style.
    pub fn with(mut self, label: impl Into<String>, value: u32) -> Self {
        self.insert(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.values.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.values.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn min_value(&self) -> Option<u32> {
        self.values.values().copied().min()
    }

    pub fn max_value(&self) -> Option<u32> {
        self.values.values().copied().max()
    }

    /// The class id of [`IGNORE_LABEL`].
    ///
    /// # Errors
    /// [`LabelmaskError::MissingIgnoreLabel`] if the table lacks it.
    pub fn ignore_id(&self) -> Result<u32, LabelmaskError> {
        self.get(IGNORE_LABEL)
            .ok_or(LabelmaskError::MissingIgnoreLabel)
    }

    /// Checks that the smallest class id is 0.
    ///
    /// # Errors
    /// [`LabelmaskError::MinValueNotZero`] carrying the observed minimum.
    pub fn check_min_is_zero(&self) -> Result<(), LabelmaskError> {
        match self.min_value() {
            Some(0) | None => Ok(()),
            Some(min) => Err(LabelmaskError::MinValueNotZero { min }),
        }
    }

    /// Resolves a label to its class id, falling back to `ignore_id`.
    pub fn class_id_or(&self, label: &str, ignore_id: u32) -> u32 {
        self.get(label).unwrap_or(ignore_id)
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, u32); N]> for LabelTable {
    fn from(entries: [(K, u32); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_id_required() {
        let table = LabelTable::from([("a", 0)]);
        assert!(matches!(
            table.ignore_id(),
            Err(LabelmaskError::MissingIgnoreLabel)
        ));

        let table = LabelTable::from([("a", 0), (IGNORE_LABEL, 1)]);
        assert_eq!(table.ignore_id().unwrap(), 1);
    }

    #[test]
    fn test_min_must_be_zero() {
        let bad = LabelTable::from([("a", 1), (IGNORE_LABEL, 2)]);
        assert!(matches!(
            bad.check_min_is_zero(),
            Err(LabelmaskError::MinValueNotZero { min: 1 })
        ));

        let good = LabelTable::from([("a", 0), (IGNORE_LABEL, 1)]);
        assert!(good.check_min_is_zero().is_ok());
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let table = LabelTable::from([(IGNORE_LABEL, 0), ("cat", 1)]);
        assert_eq!(table.class_id_or("cat", 0), 1);
        assert_eq!(table.class_id_or("zebra", 0), 0);
    }

    #[test]
    fn test_from_labels_first_seen_order() {
        let table = LabelTable::from_labels(["dog", "cat", "dog", "bird"]);
        assert_eq!(table.get(BACKGROUND_LABEL), Some(0));
        assert_eq!(table.get("dog"), Some(1));
        assert_eq!(table.get("cat"), Some(2));
        assert_eq!(table.get("bird"), Some(3));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_serde_as_plain_object() {
        let table: LabelTable =
            serde_json::from_str(r#"{"__ignore__": 0, "cat": 1}"#).expect("parse table");
        assert_eq!(table.get("cat"), Some(1));
        assert_eq!(table.max_value(), Some(1));
    }
}
