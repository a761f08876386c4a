//! Error types for regsearch-core.
//!
//! Each failure class the core can produce has its own type so callers can
//! match on it directly: configuration problems are fatal at startup, data
//! source problems are fatal for the first load but recoverable on reload,
//! and [`NoValidSearchTerms`] is a caller-input problem rather than a
//! failure of the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable configuration. Always fatal: the core never runs
/// with a partial field policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("`fields.{set}` must list at least one field")]
    EmptyFieldSet { set: &'static str },

    #[error("`fields.{set}` contains a blank field name")]
    BlankFieldName { set: &'static str },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The tabular source could not be turned into a snapshot.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("data source not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read data source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data source {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("data source {origin} has no header row")]
    MissingHeader { origin: String },

    #[error("data source {origin} has a blank column name at position {position}")]
    BlankColumn { origin: String, position: usize },

    #[error("data source {origin} declares column {column:?} more than once")]
    DuplicateColumn { origin: String, column: String },
}

/// Sanitization left nothing to search on. Reported to callers as a user
/// error, never as an empty successful search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no valid search fields provided (searchable fields: {})", .searchable.join(", "))]
pub struct NoValidSearchTerms {
    /// The fields the caller could have used.
    pub searchable: Vec<String>,
}

/// Umbrella error for operations that cross several core components.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    NoValidSearchTerms(#[from] NoValidSearchTerms),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
