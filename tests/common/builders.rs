//! Test builders: ergonomic constructors for datasets, policies, services and
//! routers.
//!
//! These are for readability in test assertions, not for production use.
//! They panic on invalid input rather than returning `Result`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use regsearch_core::{Config, DatasetStore, FieldPolicy, SearchService, Snapshot};
use regsearch_server::{router, AppState, Mode};
use tempfile::TempDir;

use super::fixtures::{AGENT_YAML, REGISTRATIONS_CSV, STANDARD_POLICY_YAML};

// ---------------------------------------------------------------------------
// On-disk CSV
// ---------------------------------------------------------------------------

/// A CSV file in its own temp directory. The directory is removed on drop.
pub struct CsvFile {
    dir: TempDir,
    path: PathBuf,
}

impl CsvFile {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registrations.csv");
        std::fs::write(&path, contents).unwrap();
        Self { dir, path }
    }

    /// The standard eight-row registration corpus.
    pub fn registrations() -> Self {
        Self::new(REGISTRATIONS_CSV)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Replace the file contents in place.
    pub fn rewrite(&self, contents: &str) {
        std::fs::write(&self.path, contents).unwrap();
    }

    pub fn remove(&self) {
        std::fs::remove_file(&self.path).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Snapshots and policies
// ---------------------------------------------------------------------------

pub fn snapshot(csv: &str) -> Snapshot {
    Snapshot::from_reader(csv.as_bytes()).unwrap()
}

pub fn policy(searchable: &[&str], exposed: &[&str]) -> FieldPolicy {
    FieldPolicy::new(searchable, exposed).unwrap()
}

/// The policy from `STANDARD_POLICY_YAML`.
pub fn standard_policy() -> FieldPolicy {
    policy(
        &["name", "surname", "cpf", "phone", "city", "state"],
        &["name", "surname", "city", "state"],
    )
}

/// Service over an in-memory snapshot. Reloads would read a path that does
/// not exist, so use [`CsvFile`] + [`service_on_disk`] for reload tests.
pub fn service(csv: &str, policy: FieldPolicy) -> SearchService {
    let store = DatasetStore::with_snapshot("/nonexistent/registrations.csv", snapshot(csv));
    SearchService::new(Arc::new(store), policy)
}

pub fn service_on_disk(file: &CsvFile, policy: FieldPolicy) -> SearchService {
    let store = DatasetStore::open(file.path()).unwrap();
    SearchService::new(Arc::new(store), policy)
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// YAML for a complete configuration pointing at `csv_path`.
pub fn config_yaml(csv_path: &Path, policy_yaml: &str) -> String {
    format!(
        "{AGENT_YAML}data:\n  csv_path: {:?}\n{policy_yaml}",
        csv_path.display().to_string()
    )
}

pub fn standard_config(csv_path: &Path) -> Config {
    Config::from_yaml(&config_yaml(csv_path, STANDARD_POLICY_YAML)).unwrap()
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Router over the standard corpus and policy. Keep the returned
/// [`CsvFile`] alive for as long as the router is used.
pub fn test_app(mode: Mode) -> (axum::Router, CsvFile) {
    let file = CsvFile::registrations();
    let config = standard_config(file.path());
    let service = service_on_disk(&file, config.fields.clone());
    let state = AppState::new(&config, service, mode);
    (router(state, &config.server.metadata_endpoint), file)
}
