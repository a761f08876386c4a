//! A2A message framing for compliant mode.
//!
//! Requests carry the search parameters as JSON text inside message parts:
//!
//! ```json
//! {"message": {"role": "user", "parts": [{"text": "{\"name\": \"Ana\"}"}]}}
//! ```
//!
//! Responses carry the serialized envelope as the text of a single agent
//! part.

use crate::envelope::Envelope;
use crate::request::RequestError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Pull the search parameters out of an A2A `SendMessageRequest` body.
///
/// Text parts are joined with spaces and trimmed before being parsed; parts
/// without text are skipped.
pub fn extract_params(body: &Value) -> Result<Map<String, Value>, RequestError> {
    let message = body
        .as_object()
        .ok_or(RequestError::NotAnObject)?
        .get("message")
        .ok_or(RequestError::MissingMessage)?;
    let parts = message.get("parts").ok_or(RequestError::MissingParts)?;
    let parts = match parts.as_array() {
        Some(parts) if !parts.is_empty() => parts,
        _ => return Err(RequestError::EmptyParts),
    };

    let text = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = text.trim();
    if text.is_empty() {
        return Err(RequestError::NoText);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(params)) => Ok(params),
        Ok(_) => Err(RequestError::ParamsNotObject),
        Err(e) => Err(RequestError::InvalidJson(e.to_string())),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentMessage {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

/// `SendMessageResponse` body.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message: AgentMessage,
}

impl SendMessageResponse {
    pub fn wrap(envelope: &Envelope) -> Self {
        let text = serde_json::to_string(envelope).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","message":"failed to encode response: {e}"}}"#)
        });
        Self {
            message: AgentMessage {
                role: "agent",
                parts: vec![Part { text }],
            },
        }
    }
}
