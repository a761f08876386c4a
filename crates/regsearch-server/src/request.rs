//! Turning request bodies into raw search terms.
//!
//! Nothing here applies policy; that is the sanitizer's job. This layer only
//! decides which JSON values can be read as text.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// The request body did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing 'message' field in request")]
    MissingMessage,
    #[error("Missing 'parts' field in message")]
    MissingParts,
    #[error("'parts' must be a non-empty list")]
    EmptyParts,
    #[error("No text content found in message parts")]
    NoText,
    #[error("Invalid JSON in message text: {0}")]
    InvalidJson(String),
    #[error("Search parameters must be a JSON object")]
    ParamsNotObject,
    #[error("{0}")]
    Body(String),
}

/// Field/term pairs read from a JSON object.
///
/// Strings are taken as-is and numbers/booleans are stringified. Nulls,
/// arrays and objects cannot be a search term and are skipped.
pub fn raw_terms(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(k, v)| {
            let term = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((k.clone(), term))
        })
        .collect()
}

/// Simple-mode body: either the terms themselves or `{"parameters": {...}}`.
pub fn simple_params(body: &Value) -> Result<&Map<String, Value>, RequestError> {
    let obj = body.as_object().ok_or(RequestError::NotAnObject)?;
    match obj.get("parameters") {
        Some(Value::Object(params)) => Ok(params),
        _ => Ok(obj),
    }
}

/// Body of `POST /lookup`.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    pub field: String,
    pub value: String,
}
