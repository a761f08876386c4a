//! [`SearchService`] wires sanitizer → search → projector over a
//! [`DatasetStore`] for transports that only deal in raw input and
//! redacted output.

use crate::error::Result;
use crate::policy::FieldPolicy;
use crate::project::project;
use crate::query::Query;
use crate::search::{search, search_exact};
use crate::store::{DatasetStore, ReloadReport, Snapshot};
use crate::types::{OutputRecord, Row};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SearchService {
    store: Arc<DatasetStore>,
    policy: Arc<FieldPolicy>,
}

impl SearchService {
    pub fn new(store: Arc<DatasetStore>, policy: FieldPolicy) -> Self {
        Self {
            store,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Substring search over raw caller terms, returning redacted records.
    ///
    /// Fails with [`NoValidSearchTerms`](crate::NoValidSearchTerms) when no
    /// term survives sanitization. Zero matches is `Ok(vec![])`.
    pub fn search<I, K, V>(&self, raw: I) -> Result<Vec<OutputRecord>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = Query::sanitize(raw, &self.policy.searchable)?;
        let snapshot = self.store.current()?;
        Ok(self.redact(search(&snapshot, &query)))
    }

    /// Exact-match lookup on one searchable field.
    pub fn lookup(&self, field: &str, value: &str) -> Result<Vec<OutputRecord>> {
        let query = Query::sanitize([(field, value)], &self.policy.searchable)?;
        let Some(value) = query.get(field) else {
            return Ok(Vec::new());
        };
        let snapshot = self.store.current()?;
        Ok(self.redact(search_exact(&snapshot, field, value)))
    }

    pub fn reload(&self) -> Result<ReloadReport> {
        Ok(self.store.reload()?)
    }

    /// Active snapshot without triggering a load.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.store.peek()
    }

    /// Configured fields that the loaded schema does not have. They are
    /// ignored in queries and omitted from output; this only reports them.
    pub fn unmatched_fields(&self, snapshot: &Snapshot) -> Vec<&str> {
        let schema = snapshot.schema();
        let mut missing: Vec<&str> = self
            .policy
            .searchable
            .iter()
            .chain(self.policy.exposed.iter())
            .filter(|f| !schema.contains(f))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    fn redact(&self, rows: Vec<&Row>) -> Vec<OutputRecord> {
        rows.into_iter()
            .map(|row| project(row, &self.policy.exposed))
            .collect()
    }
}
