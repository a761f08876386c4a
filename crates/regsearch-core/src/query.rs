//! Query sanitization.
//!
//! [`Query::sanitize`] is the only way to build a non-empty [`Query`], so a
//! query that reaches the search engine always satisfies two rules: every key
//! is a searchable field and every term is non-blank. Unknown keys are a
//! policy outcome, not an error; they are dropped quietly.

use crate::error::NoValidSearchTerms;
use crate::policy::FieldSet;
use std::collections::BTreeMap;

/// Validated field → term mapping. Terms are stored exactly as sent;
/// surrounding whitespace is part of the needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: BTreeMap<String, String>,
}

impl Query {
    /// Filter raw caller input down to policy-permitted, non-blank terms.
    ///
    /// Returns [`NoValidSearchTerms`] when nothing survives, so callers can
    /// report "bad input" separately from "no matches".
    pub fn sanitize<I, K, V>(raw: I, searchable: &FieldSet) -> Result<Self, NoValidSearchTerms>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut terms = BTreeMap::new();
        for (key, value) in raw {
            let (key, value) = (key.as_ref(), value.as_ref());
            if !searchable.contains(key) {
                tracing::trace!(field = key, "dropping non-searchable query field");
                continue;
            }
            if value.trim().is_empty() {
                tracing::trace!(field = key, "dropping blank query term");
                continue;
            }
            terms.insert(key.to_string(), value.to_string());
        }

        if terms.is_empty() {
            return Err(NoValidSearchTerms {
                searchable: searchable.to_vec(),
            });
        }
        Ok(Self { terms })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.terms.get(field).map(String::as_str)
    }

    /// `(field, term)` pairs in field-name order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
