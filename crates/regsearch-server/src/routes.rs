use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::a2a::{self, SendMessageResponse};
use crate::envelope::Envelope;
use crate::request::{raw_terms, simple_params, LookupRequest, RequestError};
use crate::{AppState, Mode};

// ---------- Health / metadata ----------

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    agent: String,
    version: String,
    records: Option<usize>,
    loaded_at: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn get_health(State(app): State<AppState>) -> Json<impl Serialize> {
    let snapshot = app.service.snapshot();
    Json(Health {
        status: "healthy",
        agent: app.agent.display_name.clone(),
        version: app.agent.version.clone(),
        records: snapshot.as_ref().map(|s| s.len()),
        loaded_at: snapshot.map(|s| s.loaded_at().to_rfc3339()),
    })
}

/// `GET /`: the index page, registered in simple mode only.
pub async fn get_index(State(app): State<AppState>) -> Html<String> {
    Html(app.landing.to_string())
}

#[tracing::instrument(skip_all)]
pub async fn get_metadata(State(app): State<AppState>) -> Response {
    Json(app.card.as_ref()).into_response()
}

// ---------- Search ----------

/// `POST /send_message`, in whichever protocol mode the server runs.
#[tracing::instrument(skip_all)]
pub async fn post_send_message(
    State(app): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = body.map(|Json(v)| v).map_err(|e| RequestError::Body(e.body_text()));
    match app.mode {
        Mode::Simple => simple(&app, body),
        Mode::Compliant => compliant(&app, body),
    }
}

fn simple(app: &AppState, body: Result<Value, RequestError>) -> Response {
    let terms = match body.and_then(|v| simple_params(&v).map(raw_terms)) {
        Ok(terms) => terms,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(Envelope::error(e.to_string()))).into_response();
        }
    };
    tracing::debug!(terms = terms.len(), "simple search");
    let (status, envelope) = Envelope::from_outcome(app.service.search(terms));
    (status, Json(envelope)).into_response()
}

fn compliant(app: &AppState, body: Result<Value, RequestError>) -> Response {
    let params = match body.and_then(|v| a2a::extract_params(&v)) {
        Ok(params) => params,
        Err(e) => {
            tracing::debug!(error = %e, "rejected A2A request");
            let envelope = Envelope::error(format!("Invalid request format: {e}"));
            let body = Json(SendMessageResponse::wrap(&envelope));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
    };
    let terms = raw_terms(&params);
    tracing::debug!(terms = terms.len(), "A2A search");
    let (status, envelope) = Envelope::from_outcome(app.service.search(terms));
    (status, Json(SendMessageResponse::wrap(&envelope))).into_response()
}

/// `POST /lookup`: exact match on a single searchable field.
#[tracing::instrument(skip_all)]
pub async fn post_lookup(
    State(app): State<AppState>,
    body: Result<Json<LookupRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(e) => {
            let envelope = Envelope::error(RequestError::Body(e.body_text()).to_string());
            return (StatusCode::BAD_REQUEST, Json(envelope)).into_response();
        }
    };
    tracing::debug!(field = %req.field, "exact lookup");
    let (status, envelope) = Envelope::from_outcome(app.service.lookup(&req.field, &req.value));
    (status, Json(envelope)).into_response()
}
