//! HTTP transport for regsearch.
//!
//! Thin axum layer over [`regsearch_core::SearchService`]: request bodies are
//! turned into raw terms, the core sanitizes, searches and redacts, and the
//! result goes back in an [`Envelope`]. Two protocol modes share the same
//! routes and differ only in how `/send_message` frames its payload; simple
//! mode also serves an HTML index at `/`.

pub mod a2a;
pub mod card;
pub mod envelope;
pub mod landing;
pub mod request;
pub mod routes;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use regsearch_core::config::AgentConfig;
use regsearch_core::{Config, SearchService};

pub use card::{agent_card, AgentCard};
pub use envelope::{Envelope, Status};

/// Request framing for `POST /send_message`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Flat JSON object of terms.
    #[default]
    Simple,
    /// A2A `SendMessageRequest` / `SendMessageResponse`.
    Compliant,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "compliant" | "a2a" => Ok(Self::Compliant),
            other => Err(format!("unknown mode {other:?} (expected simple or compliant)")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Compliant => "compliant",
        })
    }
}

/// Shared handler state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: SearchService,
    pub card: Arc<AgentCard>,
    pub agent: Arc<AgentConfig>,
    pub mode: Mode,
    /// Rendered index page; empty outside simple mode.
    pub landing: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config, service: SearchService, mode: Mode) -> Self {
        Self {
            service,
            card: Arc::new(agent_card(config)),
            agent: Arc::new(config.agent.clone()),
            mode,
            landing: match mode {
                Mode::Simple => landing::render(config, mode).into(),
                Mode::Compliant => Arc::from(""),
            },
        }
    }
}

/// Build the router. The metadata route comes from configuration; the rest
/// are fixed. `GET /` exists only in simple mode.
pub fn router(state: AppState, metadata_endpoint: &str) -> Router {
    let router = match state.mode {
        Mode::Simple => Router::new().route("/", get(routes::get_index)),
        Mode::Compliant => Router::new(),
    };
    router
        .route(metadata_endpoint, get(routes::get_metadata))
        .route("/health", get(routes::get_health))
        .route("/send_message", post(routes::post_send_message))
        .route("/lookup", post(routes::post_lookup))
        .with_state(state)
}
