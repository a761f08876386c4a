//! Configuration types for regsearch.
//!
//! [`Config::load`] reads a YAML file and layers `REGSEARCH_*` environment
//! variables on top. [`Config::from_yaml`] builds the same structure from a
//! string without touching the filesystem or environment (useful in tests).
//! Either way the field policy is validated before a [`Config`] exists, so
//! a malformed policy stops startup instead of running with a partial one.

use crate::error::ConfigError;
use crate::policy::FieldPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Paths the HTTP transport serves itself; the metadata endpoint must not
/// shadow them.
const RESERVED_PATHS: &[&str] = &["/health", "/send_message", "/lookup"];

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub agent: AgentConfig,
    pub data: DataConfig,
    pub fields: FieldPolicy,
    pub server: ServerConfig,
}

/// `agent:` section: how the service describes itself.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Machine identifier.
    pub name: String,
    /// Human-readable name used in metadata and health output.
    pub display_name: String,
    pub description: String,
    pub version: String,
}

/// `data:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Delimited source file. Relative paths resolve against the working
    /// directory.
    pub csv_path: PathBuf,
}

/// `server:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_metadata_endpoint")]
    pub metadata_endpoint: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_metadata_endpoint() -> String { "/metadata".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            metadata_endpoint: default_metadata_endpoint(),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the YAML structure before validation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawConfig {
    agent: AgentConfig,
    data: DataConfig,
    fields: RawFields,
    #[serde(default)]
    server: ServerConfig,
}

#[derive(Debug, Deserialize)]
struct RawFields {
    exposed_fields: Vec<String>,
    searchable_fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load from a YAML file, with `REGSEARCH_<SECTION>__<KEY>` environment
    /// overrides. The two field lists accept comma-separated values, e.g.
    /// `REGSEARCH_FIELDS__EXPOSED_FIELDS=name,city`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let builder = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix("REGSEARCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("fields.exposed_fields")
                    .with_list_parse_key("fields.searchable_fields"),
            );
        let config = Self::from_builder(builder)?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Build from YAML text only.
    pub fn from_yaml(src: &str) -> Result<Self, ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(src, config::FileFormat::Yaml)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig = builder.build()?.try_deserialize()?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        let fields = FieldPolicy::new(raw.fields.searchable_fields, raw.fields.exposed_fields)?;

        if raw.agent.display_name.trim().is_empty() {
            return Err(ConfigError::Invalid("`agent.display_name` is blank".into()));
        }
        if raw.data.csv_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("`data.csv_path` is blank".into()));
        }

        let endpoint = raw.server.metadata_endpoint.as_str();
        if !endpoint.starts_with('/') || endpoint.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "`server.metadata_endpoint` must be a path like /metadata, got {endpoint:?}"
            )));
        }
        if RESERVED_PATHS.contains(&endpoint) {
            return Err(ConfigError::Invalid(format!(
                "`server.metadata_endpoint` {endpoint:?} collides with a built-in route"
            )));
        }

        Ok(Self {
            agent: raw.agent,
            data: raw.data,
            fields,
            server: raw.server,
        })
    }

    /// `http://host:port` as advertised in metadata.
    pub fn public_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
