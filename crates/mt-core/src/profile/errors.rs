use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::ProfileField;

/// Field name → human-readable validation message.
///
/// A field without an entry is valid. Every write is scoped: a validation
/// pass over a set of fields replaces exactly those entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<ProfileField, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Sets or clears a single entry.
    pub fn set(&mut self, field: ProfileField, error: Option<String>) {
        match error {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    /// Replaces the entries of `fields` with those found in `report`.
    ///
    /// Entries for fields outside `fields` are left untouched.
    pub fn merge_scoped(&mut self, fields: &[ProfileField], report: &ErrorMap) {
        for field in fields {
            self.set(*field, report.get(*field).map(str::to_string));
        }
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}
