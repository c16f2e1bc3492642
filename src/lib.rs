// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storefront API server.
//!
//! E-commerce backend built around two cross-cutting pipeline stages:
//! session-cookie authentication and terminal error classification. Every
//! protected request passes through the session verifier before its handler
//! runs, and every failure a handler produces is rendered by the classifier
//! into one stable JSON envelope.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router (Axum)
//! - `auth` - Session-cookie authentication
//! - `classifier` - Terminal error classification and the response envelope
//! - `store` - In-memory persistence collaborator

pub mod api;
pub mod auth;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
