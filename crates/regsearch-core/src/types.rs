//! Core data types shared across the store, search and projection layers.
//!
//! A [`Schema`] is derived from the header of the loaded source. Every
//! [`Row`] in a snapshot shares the same schema through an `Arc`, so column
//! lookups are resolved against a fixed, load-time-validated layout instead
//! of arbitrary string keys on every access. An [`OutputRecord`] is what
//! leaves the core: a row reduced to its exposed fields.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Ordered column names of a snapshot plus a name → position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from column names. Returns the offending name on the
    /// first duplicate.
    pub fn new<I, S>(columns: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut positions = HashMap::new();
        for (i, column) in columns.into_iter().enumerate() {
            let column = column.into();
            if positions.insert(column.clone(), i).is_some() {
                return Err(column);
            }
            names.push(column);
        }
        Ok(Self {
            columns: names,
            positions,
        })
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One record of a snapshot. Immutable once built.
///
/// Values are text; `None` is a null cell (empty in the source).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Box<[Option<String>]>,
}

impl Row {
    /// `values` must line up with `schema`; the loader guarantees this.
    pub(crate) fn new(schema: Arc<Schema>, values: Vec<Option<String>>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self {
            schema,
            values: values.into_boxed_slice(),
        }
    }

    /// Value of `column`, or `None` if the column is absent or the cell is null.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.schema.position(column).and_then(|i| self.at(i))
    }

    /// Value at a schema position resolved ahead of time.
    pub fn at(&self, position: usize) -> Option<&str> {
        self.values.get(position).and_then(|v| v.as_deref())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.schema
            .columns()
            .iter()
            .zip(self.values.iter())
            .map(|(c, v)| (c.as_str(), v.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// OutputRecord
// ---------------------------------------------------------------------------

/// A row redacted down to exposed fields, in exposed-field declaration order.
///
/// Serializes as a JSON object; null cells serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputRecord {
    fields: Vec<(String, Option<String>)>,
}

impl OutputRecord {
    pub(crate) fn push(&mut self, field: &str, value: Option<&str>) {
        self.fields
            .push((field.to_string(), value.map(str::to_string)));
    }

    /// `Some(value)` if the key is present (value may itself be null).
    pub fn get(&self, field: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reinterpret the record as a row with its own schema, e.g. to feed it
    /// back through the projector.
    pub fn into_row(self) -> Row {
        let (columns, values): (Vec<String>, Vec<Option<String>>) =
            self.fields.into_iter().unzip();
        // Keys come from a projection over a duplicate-free field set.
        let schema = Schema {
            positions: columns
                .iter()
                .enumerate()
                .map(|(i, c)| (c.clone(), i))
                .collect(),
            columns,
        };
        Row::new(Arc::new(schema), values)
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
