//! The `{status, message, count, results}` response envelope.

use axum::http::StatusCode;
use regsearch_core::{Error, NoValidSearchTerms, OutputRecord};
use serde::Serialize;

const NO_VALID_TERMS: &str =
    "No valid search parameters provided. Please provide at least one search field.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Stable response shape. `count` and `results` are present on every
/// response, including errors.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub message: String,
    pub count: usize,
    pub results: Vec<OutputRecord>,
    /// Echoed back when the caller sent nothing searchable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_fields: Option<Vec<String>>,
}

impl Envelope {
    pub fn success(results: Vec<OutputRecord>) -> Self {
        let message = match results.len() {
            0 => "No matching records found".to_string(),
            n => format!("Found {n} matching record(s)"),
        };
        Self {
            status: Status::Success,
            message,
            count: results.len(),
            results,
            searchable_fields: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            count: 0,
            results: Vec::new(),
            searchable_fields: None,
        }
    }

    pub fn no_valid_terms(err: &NoValidSearchTerms) -> Self {
        Self {
            searchable_fields: Some(err.searchable.clone()),
            ..Self::error(NO_VALID_TERMS)
        }
    }

    /// Envelope and HTTP status for a core search outcome.
    pub fn from_outcome(outcome: regsearch_core::Result<Vec<OutputRecord>>) -> (StatusCode, Self) {
        match outcome {
            Ok(records) => (StatusCode::OK, Self::success(records)),
            Err(Error::NoValidSearchTerms(e)) => {
                (StatusCode::BAD_REQUEST, Self::no_valid_terms(&e))
            }
            Err(e) => {
                tracing::error!(error = %e, "search failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::error(format!("Dataset unavailable: {e}")),
                )
            }
        }
    }
}
