// crates/gridbook-core/src/core/record.rs
// ============================================================================
// Module: Ordered Records
// Description: Field-ordered JSON records mapped from sheet rows.
// Purpose: Preserve header field order through decode, merge, and serialize.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Record`] is an ordered list of named JSON values. Unlike a plain JSON
//! map, it preserves insertion order, so records decoded from a sheet row
//! serialize their fields in header order and column-oriented consumers can
//! walk fields positionally. [`FoundRecord`] pairs a record with the data row
//! index and header it was decoded from so a later write-back can recompute
//! the absolute row.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde_json::Value;

// ============================================================================
// SECTION: Record Type
// ============================================================================

/// Ordered collection of named JSON values decoded from one sheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Fields in insertion order.
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Returns the value of the named field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|entry| entry.0 == name).map(|entry| &entry.1)
    }

    /// Sets the named field, replacing an existing value in place or
    /// appending a new field at the end.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(entry) = self.fields.iter_mut().find(|entry| entry.0 == name) {
            entry.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Applies every field of `patch` over this record. Existing fields keep
    /// their position; new fields are appended in patch order.
    pub fn merge(&mut self, patch: &Self) {
        for (name, value) in patch.iter() {
            self.set(name, value.clone());
        }
    }

    /// Removes fields whose value is null or an empty string.
    pub fn drop_empty_fields(&mut self) {
        self.fields.retain(|(_, value)| match value {
            Value::Null => false,
            Value::String(text) => !text.is_empty(),
            _ => true,
        });
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<(String, Value)>> for Record {
    fn from(entries: Vec<(String, Value)>) -> Self {
        let mut record = Self::new();
        for (name, value) in entries {
            record.set(name, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Map visitor that rebuilds a record in source field order.
struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            record.set(name, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

// ============================================================================
// SECTION: Found Records
// ============================================================================

/// Record located by key, with the context needed for a later write-back.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRecord {
    /// The decoded record.
    pub record: Record,
    /// Zero-based index of the record among data rows.
    pub data_index: usize,
    /// Header row the record was decoded against.
    pub header: Vec<String>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
