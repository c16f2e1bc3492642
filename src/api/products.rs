// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{classifier::PipelineError, error::ApiError, models::Product, state::AppState};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, body = [Product]))
)]
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let store = state.store.read().await;
    Json(store.list_products())
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    params(
        ("product_id" = String, Path, description = "Identifier of the product")
    ),
    tag = "Products",
    responses((status = 200, body = Product), (status = 404))
)]
pub async fn get_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Product>, PipelineError> {
    let store = state.store.read().await;
    store
        .get_product(&product_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Environment};
    use crate::models::CreateProductRequest;
    use crate::store::InMemoryStore;

    fn test_state() -> AppState {
        AppState::new(AppConfig::for_tests(Environment::Test), InMemoryStore::new())
    }

    #[tokio::test]
    async fn list_products_returns_catalog() {
        let state = test_state();
        let product = state
            .store
            .write()
            .await
            .create_product(CreateProductRequest {
                name: "Mug".into(),
                description: "ceramic".into(),
                price_cents: 1200,
            })
            .expect("create product");

        let Json(products) = list_products(State(state)).await;
        assert_eq!(products, vec![product]);
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let result = get_product(Path("missing".to_string()), State(test_state())).await;
        match result {
            Err(PipelineError::App(err)) => assert_eq!(err.message, "Product not found"),
            other => panic!("expected application error, got {other:?}"),
        }
    }
}
