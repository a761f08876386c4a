//! Field policy: which columns may be queried and which may be returned.
//!
//! The two sets are independent. A column can be searchable without ever
//! being exposed (a national identity number is the usual example), exposed
//! without being searchable, or both.

use crate::error::ConfigError;
use serde::Serialize;

/// An ordered, duplicate-free, non-empty list of column names.
///
/// Declaration order is kept because it drives the key order of projected
/// records and the order fields are advertised in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<String>,
}

impl FieldSet {
    /// Validate a configured list. `set` names the config key for error
    /// messages. Names are trimmed; duplicates after trimming are dropped
    /// with a warning.
    pub fn new<I, S>(set: &'static str, fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for field in fields {
            let field = field.as_ref().trim();
            if field.is_empty() {
                return Err(ConfigError::BlankFieldName { set });
            }
            if out.iter().any(|f| f == field) {
                tracing::warn!(set, field, "duplicate field name in policy, ignoring");
                continue;
            }
            out.push(field.to_string());
        }
        if out.is_empty() {
            return Err(ConfigError::EmptyFieldSet { set });
        }
        Ok(Self { fields: out })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a validated set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.fields.clone()
    }
}

/// The static exposure policy, validated once at configuration load and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPolicy {
    pub searchable: FieldSet,
    pub exposed: FieldSet,
}

impl FieldPolicy {
    pub fn new<A, B, S, T>(searchable: A, exposed: B) -> Result<Self, ConfigError>
    where
        A: IntoIterator<Item = S>,
        B: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            searchable: FieldSet::new("searchable_fields", searchable)?,
            exposed: FieldSet::new("exposed_fields", exposed)?,
        })
    }

    /// Searchable fields that are never returned to callers.
    pub fn search_only(&self) -> impl Iterator<Item = &str> {
        self.searchable.iter().filter(|f| !self.exposed.contains(f))
    }
}
