//! Flat key/value answers of one stage
//!
//! Values are arbitrary JSON. Every typed accessor is lenient: an absent key
//! or a value of the wrong shape reads as the empty/default value.

use crate::entries::{ListEntry, ResentmentEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use stepwork_catalog::{DerivedField, SectionKey};

/// Unlock flag written once a stage password is accepted
pub const STEP_UNLOCKED: &str = "stepUnlocked";
/// Export flag written once an artifact has been produced
pub const HAS_EXPORTED: &str = "hasExported";
/// List of resentment grid rows
pub const RESENTMENTS: &str = "resentments";

/// Field data of one progress record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldData(BTreeMap<String, Value>);

impl FieldData {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Store a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// String value, empty when absent or not a string
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Text is non-empty after trimming
    #[must_use]
    pub fn has_text(&self, key: &str) -> bool {
        !self.text(key).trim().is_empty()
    }

    /// Only a literal `true` counts
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.flag(STEP_UNLOCKED)
    }

    #[must_use]
    pub fn has_exported(&self) -> bool {
        self.flag(HAS_EXPORTED)
    }

    /// Value of a derived section field, preferring the stable key
    #[must_use]
    pub fn derived(&self, key: &SectionKey, field: DerivedField) -> Option<&Value> {
        self.get(&key.field(field))
            .or_else(|| self.get(&key.legacy_field(field)))
    }

    /// Section-level completion confirmation
    #[must_use]
    pub fn section_confirmed(&self, key: &SectionKey) -> bool {
        matches!(
            self.derived(key, DerivedField::Completed),
            Some(Value::Bool(true))
        )
    }

    /// Ticked state of one checklist row of a section
    #[must_use]
    pub fn row_checked(&self, key: &SectionKey, row: &str) -> bool {
        self.checklist(key)
            .and_then(|rows| rows.get(row))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Checklist map of a section, `None` when absent or not a map
    #[must_use]
    pub fn checklist(&self, key: &SectionKey) -> Option<&Map<String, Value>> {
        self.derived(key, DerivedField::Checklist)
            .and_then(Value::as_object)
    }

    /// Checklist map with one row set, ready to be written back whole
    #[must_use]
    pub fn checklist_with(&self, key: &SectionKey, row: &str, checked: bool) -> Value {
        let mut rows = self.checklist(key).cloned().unwrap_or_default();
        rows.insert(row.to_string(), Value::Bool(checked));
        Value::Object(rows)
    }

    /// List entries under `key`, skipping elements that are not entry objects
    #[must_use]
    pub fn list_entries(&self, key: &str) -> Vec<ListEntry> {
        decode_list(self.get(key))
    }

    /// Any list entry under `key` has content
    #[must_use]
    pub fn has_filled_entry(&self, key: &str) -> bool {
        self.list_entries(key).iter().any(ListEntry::is_filled)
    }

    /// Resentment grid rows, skipping malformed elements
    #[must_use]
    pub fn resentments(&self) -> Vec<ResentmentEntry> {
        decode_list(self.get(RESENTMENTS))
    }

    /// Share of stored values that carry content, as a rounded percentage
    #[must_use]
    pub fn fill_percentage(&self) -> u8 {
        if self.0.is_empty() {
            return 0;
        }
        let filled = self.0.values().filter(|value| is_filled_value(value)).count();
        let percent = (filled * 100 + self.0.len() / 2) / self.0.len();
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

impl From<BTreeMap<String, Value>> for FieldData {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for FieldData {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, Value)> for FieldData {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

fn decode_list<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn is_filled_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(_) | Value::Number(_) => true,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stepwork_catalog::stage;

    fn data(value: Value) -> FieldData {
        serde_json::from_value(value).unwrap()
    }

    fn reading_key() -> SectionKey {
        stage(1).unwrap().sections().nth(1).unwrap().key()
    }

    #[test]
    fn wrong_types_read_as_default() {
        let fields = data(json!({
            "admit": 42,
            "stepUnlocked": "true",
            "resentments": {"not": "a list"},
            "powerless_examples": "text"
        }));
        assert_eq!(fields.text("admit"), "");
        assert!(!fields.is_unlocked());
        assert!(fields.resentments().is_empty());
        assert!(fields.list_entries("powerless_examples").is_empty());
    }

    #[test]
    fn whitespace_is_not_text() {
        let fields = data(json!({"admit": "  \t"}));
        assert!(!fields.has_text("admit"));
    }

    #[test]
    fn stable_key_wins_over_legacy() {
        let key = reading_key();
        let fields = data(json!({
            (key.field(DerivedField::Completed)): false,
            (key.legacy_field(DerivedField::Completed)): true,
        }));
        assert!(!fields.section_confirmed(&key));
    }

    #[test]
    fn legacy_key_is_read() {
        let key = reading_key();
        let fields = data(json!({
            (key.legacy_field(DerivedField::Checklist)): {"read1": true}
        }));
        assert!(fields.row_checked(&key, "read1"));
        assert!(!fields.row_checked(&key, "read2"));
    }

    #[test]
    fn checklist_with_keeps_other_rows() {
        let key = reading_key();
        let fields = data(json!({
            (key.field(DerivedField::Checklist)): {"read1": true}
        }));
        let updated = fields.checklist_with(&key, "read2", true);
        assert_eq!(updated, json!({"read1": true, "read2": true}));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let fields = data(json!({
            "items": [{"id": "items_1", "content": "one"}, "junk", {"content": 7}]
        }));
        let entries = fields.list_entries("items");
        assert_eq!(entries.len(), 1);
        assert!(fields.has_filled_entry("items"));
    }

    #[test]
    fn fill_percentage_counts_content() {
        assert_eq!(FieldData::new().fill_percentage(), 0);
        let fields = data(json!({
            "a": "answer",
            "b": "",
            "c": false,
            "d": [],
        }));
        assert_eq!(fields.fill_percentage(), 50);
        let partial = data(json!({"a": "x", "b": "", "c": ""}));
        assert_eq!(partial.fill_percentage(), 33);
    }
}
