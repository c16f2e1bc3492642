// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog management, restricted to staff accounts.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    auth::CurrentUser,
    classifier::PipelineError,
    error::ApiError,
    models::{CreateProductRequest, Product},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    tag = "Admin",
    responses((status = 201, body = Product), (status = 400), (status = 403))
)]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), PipelineError> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Admin access required").into());
    }
    let mut store = state.store.write().await;
    let product = store.create_product(request)?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Environment};
    use crate::models::{User, UserRole};
    use crate::store::{DbError, InMemoryStore};

    fn staff() -> User {
        User {
            id: "staff_1".into(),
            email: "staff@example.com".into(),
            name: "Staff".into(),
            role: UserRole::Admin,
        }
    }

    fn test_state() -> AppState {
        AppState::new(AppConfig::for_tests(Environment::Test), InMemoryStore::new())
    }

    fn mug() -> CreateProductRequest {
        CreateProductRequest {
            name: "Mug".into(),
            description: "ceramic".into(),
            price_cents: 1200,
        }
    }

    #[tokio::test]
    async fn staff_can_create_products() {
        let state = test_state();
        let (status, Json(product)) = create_product(
            State(state.clone()),
            Extension(CurrentUser(staff())),
            Json(mug()),
        )
        .await
        .expect("creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(state.store.read().await.list_products(), vec![product]);
    }

    #[tokio::test]
    async fn customers_are_forbidden() {
        let customer = User {
            role: UserRole::Customer,
            ..staff()
        };
        let result = create_product(
            State(test_state()),
            Extension(CurrentUser(customer)),
            Json(mug()),
        )
        .await;
        match result {
            Err(PipelineError::App(err)) => assert_eq!(err.status, StatusCode::FORBIDDEN),
            other => panic!("expected forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_names_surface_the_database_error() {
        let state = test_state();
        create_product(
            State(state.clone()),
            Extension(CurrentUser(staff())),
            Json(mug()),
        )
        .await
        .expect("first creation succeeds");

        let result = create_product(State(state), Extension(CurrentUser(staff())), Json(mug())).await;
        match result {
            Err(PipelineError::Db(DbError::Known { code, .. })) => assert_eq!(code, "P2002"),
            other => panic!("expected known database error, got {other:?}"),
        }
    }
}
