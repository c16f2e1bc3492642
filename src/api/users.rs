// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{Extension, Json};

use crate::{auth::CurrentUser, models::User};

/// Echo the authenticated account, as resolved by the session layer.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Users",
    responses((status = 200, body = User), (status = 403))
)]
pub async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
