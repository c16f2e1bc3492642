// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Authentication Module
//!
//! Cookie-based session authentication for the storefront API.
//!
//! ## Auth Flow
//!
//! 1. The frontend's identity provider signs a session token and sets it as
//!    the `authjs.session-token` cookie
//! 2. `require_session` runs before every protected handler:
//!    - reads the cookie
//!    - verifies the token with a key derived from `AUTH_SECRET` and a salt
//!      fixed to the cookie name
//!    - resolves the `sub` claim to a persisted user
//!    - attaches the user to the request extensions as [`CurrentUser`]
//!
//! ## Security
//!
//! Every rejection, whatever its internal reason, produces the identical
//! `403 "Unauthorized: Invalid token"` response. The distinct reasons exist
//! only in server-side logs, so a probing client learns nothing about which
//! step failed.

pub mod middleware;
pub mod session;

pub use middleware::{require_session, CurrentUser};
pub use session::{SessionClaims, SessionDecoder, SESSION_COOKIE};
