//! regsearch-core: search and field projection over a registration dataset.
//!
//! This crate holds everything with privacy or matching invariants. The
//! transport crate and the binary only feed it raw input and serialize what
//! comes back.
//!
//! # Architecture
//!
//! ```text
//! raw terms ──► Query::sanitize ──► search ──► project ──► OutputRecord
//!                                     ▲
//!                     DatasetStore ───┘ (Arc<Snapshot>, swapped on reload)
//! ```
//!
//! [`SearchService`] bundles the pipeline for callers that do not need the
//! individual steps.

pub mod config;
pub mod error;
pub mod policy;
pub mod project;
pub mod query;
pub mod search;
pub mod service;
pub mod store;
pub mod types;

pub use crate::config::Config;
pub use error::{ConfigError, DataSourceError, Error, NoValidSearchTerms, Result};
pub use policy::{FieldPolicy, FieldSet};
pub use project::project;
pub use query::Query;
pub use search::{search, search_exact};
pub use service::SearchService;
pub use store::{DatasetStore, ReloadReport, Snapshot};
pub use types::{OutputRecord, Row, Schema};
