// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Terminal error classification.
//!
//! Every failure that escapes a route handler ends up here and nowhere else.
//! Handlers return [`PipelineError`]; its `IntoResponse` stashes the error in
//! the response extensions, and the outermost [`error_boundary`] layer pulls
//! it back out, logs it, classifies it, and renders exactly one JSON envelope
//! with the matching HTTP status. Classification is a pure function of the
//! error's tag, so the same failure always produces the same response.
//!
//! Session authentication does not route through this module: the verifier
//! absorbs its own failures and renders the uniform rejection directly (see
//! `auth::middleware`).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::{AppConfig, Environment};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::DbError;

/// Marker token opening the useful part of a query-validation message.
const VALIDATION_MARKER: &str = "Argument";

/// Fixed message for database failures with no identifiable cause.
const UNKNOWN_DB_MESSAGE: &str = "Something went wrong";

/// Fallback message for unclassified failures that carry none of their own.
const FALLBACK_MESSAGE: &str = "Internal Server Error";

/// Any failure a route handler can produce.
///
/// `Db` and `App` arrive via `?` from the store and from business logic;
/// `Other` is the catch-all for failures outside both domains.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{0}")]
    App(ApiError),
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    pub fn other(message: impl Into<String>) -> Self {
        PipelineError::Other(message.into())
    }
}

impl From<ApiError> for PipelineError {
    fn from(err: ApiError) -> Self {
        PipelineError::App(err)
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        // The placeholder only reaches a client if the boundary layer is
        // missing from the stack; the real envelope is rendered there, where
        // the request path is known.
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// A failure reduced to one of the five stable kinds.
///
/// Derived once at the boundary; all rendering switches on this tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedError {
    /// Database failure with a recognized driver code.
    DatabaseKnown {
        code: String,
        meta: Option<Value>,
        message: String,
    },
    /// Database failure with no identifiable cause.
    DatabaseUnknown,
    /// Query-layer validation failure.
    DatabaseValidation { message: String },
    /// Deliberately raised business-logic error.
    Application { status: StatusCode, message: String },
    /// Anything else.
    Unclassified { message: String },
}

/// Map a caught failure to its classification. Pure and total.
pub fn classify(err: PipelineError) -> ClassifiedError {
    match err {
        PipelineError::Db(DbError::Known { code, meta, message }) => {
            ClassifiedError::DatabaseKnown { code, meta, message }
        }
        PipelineError::Db(DbError::Unknown { .. }) => ClassifiedError::DatabaseUnknown,
        PipelineError::Db(DbError::Validation { message }) => {
            ClassifiedError::DatabaseValidation { message }
        }
        PipelineError::App(ApiError { status, message }) => {
            ClassifiedError::Application { status, message }
        }
        PipelineError::Other(message) => ClassifiedError::Unclassified { message },
    }
}

/// Status for a known driver error code. Codes outside the table map to 400.
fn known_code_status(code: &str) -> StatusCode {
    match code {
        "P2000" | "P2002" | "P2003" | "P2011" => StatusCode::BAD_REQUEST,
        "P2001" | "P2025" => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Collapse all line breaks to single spaces.
fn clean_message(message: &str) -> String {
    message.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Strip the query-layer preamble from a validation message.
///
/// Keeps the substring from the first `Argument` onward with line breaks
/// collapsed. A message without the marker yields an empty string.
fn validation_detail(message: &str) -> String {
    match message.find(VALIDATION_MARKER) {
        Some(index) => clean_message(&message[index..]),
        None => String::new(),
    }
}

/// Canonical failure envelope.
///
/// Field order is part of the wire contract. `message` is a string for every
/// branch except known database errors in production, where it is the
/// structured `meta` object.
#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    #[serde(rename = "statusCode")]
    status_code: u16,
    path: String,
    message: Value,
}

/// Render the canonical envelope for a status, request path, and message.
pub fn error_response(status: StatusCode, path: &str, message: impl Into<Value>) -> Response {
    let body = Json(ErrorEnvelope {
        success: false,
        status_code: status.as_u16(),
        path: path.to_string(),
        message: message.into(),
    });
    (status, body).into_response()
}

/// Classify a failure and render its response. First matching branch wins.
pub fn respond(err: PipelineError, path: &str, config: &AppConfig) -> Response {
    // Server-side record of the raw failure; best-effort, suppressed in test
    // runs to keep output clean.
    if config.environment != Environment::Test {
        tracing::error!(%path, error = ?err, "request failed");
    }

    match classify(err) {
        ClassifiedError::DatabaseKnown { code, meta, message } => {
            let status = known_code_status(&code);
            let message = if config.environment == Environment::Production {
                // Never the raw driver message: it can leak schema and query
                // detail. The structured meta is all a client gets.
                meta.unwrap_or(Value::Null)
            } else {
                Value::String(clean_message(&message))
            };
            error_response(status, path, message)
        }
        ClassifiedError::DatabaseUnknown => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, path, UNKNOWN_DB_MESSAGE)
        }
        ClassifiedError::DatabaseValidation { message } => {
            error_response(StatusCode::BAD_REQUEST, path, validation_detail(&message))
        }
        ClassifiedError::Application { status, message } => {
            ApiError::new(status, message).into_response()
        }
        ClassifiedError::Unclassified { message } => {
            let message = if message.is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                message
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, path, message)
        }
    }
}

/// Outermost pipeline layer: catches every stashed handler failure.
///
/// Must wrap all routes, including the session-authentication layer, so that
/// nothing below it can leak an unnormalized response.
pub async fn error_boundary(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().to_string();
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<PipelineError>() {
        Some(err) => respond(err, &path, &state.config),
        None => response,
    }
}
