// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session authentication middleware.
//!
//! Apply [`require_session`] to a router subtree to authenticate every
//! request before its handler runs. On success the resolved user is attached
//! to the request extensions as [`CurrentUser`]; handlers take it with
//! `Extension<CurrentUser>`.
//!
//! Fail closed, fail uniformly: whichever step fails (missing cookie, bad
//! signature, expired token, subject missing, user gone), the client sees the
//! same `403 "Unauthorized: Invalid token"` envelope. The distinct reasons
//! are logged server-side only.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use super::session::SESSION_COOKIE;
use crate::classifier::error_response;
use crate::config::Environment;
use crate::models::User;
use crate::state::AppState;

/// The single client-visible rejection message.
const REJECTION_MESSAGE: &str = "Unauthorized: Invalid token";

/// Authenticated user for the current request.
///
/// Immutable request-scoped value; it lives only in this request's
/// extensions and is never cached across requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Internal rejection reasons, for diagnostic logging only.
#[derive(Debug)]
enum SessionReject {
    MissingCookie,
    InvalidToken(String),
    MissingSubject,
    UserNotFound(String),
}

impl std::fmt::Display for SessionReject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionReject::MissingCookie => write!(f, "Unauthorized: No token found"),
            SessionReject::InvalidToken(detail) => {
                write!(f, "Unauthorized: Invalid token ({detail})")
            }
            SessionReject::MissingSubject => write!(f, "Invalid or missing user ID in token"),
            SessionReject::UserNotFound(subject) => {
                write!(f, "Unauthorized: User not found ({subject})")
            }
        }
    }
}

/// Authenticate the request or reject it with the uniform 403 envelope.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().to_string();
    match resolve_session(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(reject) => {
            if state.config.environment != Environment::Test {
                tracing::warn!(%path, reason = %reject, "session authentication failed");
            }
            error_response(StatusCode::FORBIDDEN, &path, REJECTION_MESSAGE)
        }
    }
}

/// Run the verification steps in order; the first failure wins.
async fn resolve_session(state: &AppState, headers: &HeaderMap) -> Result<User, SessionReject> {
    let token = session_cookie(headers).ok_or(SessionReject::MissingCookie)?;

    let claims = state
        .sessions
        .decode(&token)
        .map_err(|err| SessionReject::InvalidToken(err.to_string()))?;

    let subject = claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(SessionReject::MissingSubject)?;

    // One awaited single-row lookup per request; the store owns its own
    // concurrency safety.
    let user = state
        .store
        .read()
        .await
        .find_user_by_id(&subject)
        .ok_or(SessionReject::UserNotFound(subject))?;

    Ok(user)
}

/// Read the session cookie from the request headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
