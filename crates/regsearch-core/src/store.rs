//! Store: the in-memory dataset snapshot and its swappable handle.
//!
//! A [`Snapshot`] is the whole table as of one load. It is never mutated;
//! the unit of change is the snapshot itself. [`DatasetStore`] owns the
//! currently published snapshot behind a single `Arc` that reload swaps in
//! one step, so a search holding the old `Arc` finishes against the old data
//! and no reader can observe a half-built table.

use crate::error::DataSourceError;
use crate::types::{Row, Schema};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable rows × columns table, all values text.
#[derive(Debug, Clone)]
pub struct Snapshot {
    schema: Arc<Schema>,
    rows: Vec<Row>,
    source: Option<PathBuf>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Read a delimited file with a header row.
    ///
    /// Every value is kept as text with surrounding whitespace trimmed;
    /// cells that are empty after trimming become nulls.
    pub fn load(path: &Path) -> Result<Self, DataSourceError> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataSourceError::NotFound(path.to_path_buf()),
            _ => DataSourceError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let mut snapshot = Self::parse(file, &path.display().to_string())?;
        snapshot.source = Some(path.to_path_buf());
        Ok(snapshot)
    }

    /// Parse CSV text from any reader. Used for in-memory sources.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataSourceError> {
        Self::parse(reader, "<memory>")
    }

    fn parse<R: Read>(reader: R, origin: &str) -> Result<Self, DataSourceError> {
        let malformed = |source| DataSourceError::Malformed {
            origin: origin.to_string(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers().map_err(malformed)?.clone();
        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(DataSourceError::MissingHeader {
                origin: origin.to_string(),
            });
        }
        if let Some(position) = headers.iter().position(str::is_empty) {
            return Err(DataSourceError::BlankColumn {
                origin: origin.to_string(),
                position,
            });
        }
        let schema = Arc::new(Schema::new(headers.iter()).map_err(|column| {
            DataSourceError::DuplicateColumn {
                origin: origin.to_string(),
                column,
            }
        })?);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(malformed)?;
            let values = record
                .iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect();
            rows.push(Row::new(Arc::clone(&schema), values));
        }

        Ok(Self {
            schema,
            rows,
            source: None,
            loaded_at: Utc::now(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// File the snapshot was read from; `None` for in-memory sources.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

// ---------------------------------------------------------------------------
// DatasetStore
// ---------------------------------------------------------------------------

/// Row and column counts of a freshly published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadReport {
    pub previous_rows: Option<usize>,
    pub rows: usize,
    pub columns: usize,
}

/// Owner of the active snapshot.
///
/// Readers call [`current`](Self::current) and get an `Arc` they can hold for
/// as long as they like. [`reload`](Self::reload) is serialized against
/// itself and publishes with a single pointer swap; when it fails the
/// previous snapshot stays active.
#[derive(Debug)]
pub struct DatasetStore {
    source: PathBuf,
    active: RwLock<Option<Arc<Snapshot>>>,
    reload_lock: Mutex<()>,
}

impl DatasetStore {
    /// Create a store that loads lazily on first [`current`](Self::current).
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            active: RwLock::new(None),
            reload_lock: Mutex::new(()),
        }
    }

    /// Create a store and load it immediately, failing if the source is
    /// missing or malformed.
    pub fn open(source: impl Into<PathBuf>) -> Result<Self, DataSourceError> {
        let store = Self::new(source);
        store.reload()?;
        Ok(store)
    }

    /// Wrap an already-built snapshot. Reloads read from `source`.
    pub fn with_snapshot(source: impl Into<PathBuf>, snapshot: Snapshot) -> Self {
        Self {
            source: source.into(),
            active: RwLock::new(Some(Arc::new(snapshot))),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The active snapshot, loading it from the source if nothing has been
    /// loaded yet.
    pub fn current(&self) -> Result<Arc<Snapshot>, DataSourceError> {
        if let Some(snapshot) = self.active.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let _guard = self.reload_lock.lock();
        // Another caller may have loaded while we waited.
        if let Some(snapshot) = self.active.read().as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(self.load()?);
        *self.active.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The active snapshot if one has been loaded; never touches the source.
    pub fn peek(&self) -> Option<Arc<Snapshot>> {
        self.active.read().clone()
    }

    /// Re-read the source and publish the result.
    pub fn reload(&self) -> Result<ReloadReport, DataSourceError> {
        let _guard = self.reload_lock.lock();
        let snapshot = match self.load() {
            Ok(s) => Arc::new(s),
            Err(e) => {
                if self.active.read().is_some() {
                    tracing::warn!(
                        source = %self.source.display(),
                        error = %e,
                        "reload failed, keeping previous snapshot"
                    );
                }
                return Err(e);
            }
        };
        let (rows, columns) = (snapshot.len(), snapshot.schema().len());
        let previous = self.active.write().replace(snapshot);
        let report = ReloadReport {
            previous_rows: previous.map(|p| p.len()),
            rows,
            columns,
        };
        tracing::info!(
            source = %self.source.display(),
            rows = report.rows,
            columns = report.columns,
            "dataset snapshot published"
        );
        Ok(report)
    }

    fn load(&self) -> Result<Snapshot, DataSourceError> {
        Snapshot::load(&self.source)
    }
}
