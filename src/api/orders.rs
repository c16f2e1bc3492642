// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    auth::CurrentUser,
    classifier::PipelineError,
    error::ApiError,
    models::{CreateOrderRequest, Order, UpdateOrderStatusRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    tag = "Orders",
    responses((status = 201, body = Order), (status = 400))
)]
pub async fn create_order(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), PipelineError> {
    let mut store = state.store.write().await;
    let order = store.create_order(&user.id, request)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Admins see every order; customers only their own.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses((status = 200, body = [Order]))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<Order>> {
    let store = state.store.read().await;
    let orders = if user.is_admin() {
        store.list_orders()
    } else {
        store.orders_for_user(&user.id)
    };
    Json(orders)
}

/// A customer asking for someone else's order gets the same "not found" as
/// for a nonexistent one; order ids are not probeable.
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    params(
        ("order_id" = String, Path, description = "Identifier of the order")
    ),
    tag = "Orders",
    responses((status = 200, body = Order), (status = 404))
)]
pub async fn get_order(
    Path(order_id): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Order>, PipelineError> {
    let store = state.store.read().await;
    match store.get_order(&order_id) {
        Some(order) if user.is_admin() || order.user_id == user.id => Ok(Json(order)),
        _ => Err(ApiError::not_found("Order not found").into()),
    }
}

#[utoipa::path(
    patch,
    path = "/api/orders/{order_id}/status",
    params(
        ("order_id" = String, Path, description = "Identifier of the order")
    ),
    request_body = UpdateOrderStatusRequest,
    tag = "Orders",
    responses((status = 200, body = Order), (status = 403), (status = 404))
)]
pub async fn update_order_status(
    Path(order_id): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, PipelineError> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Admin access required").into());
    }
    let mut store = state.store.write().await;
    store
        .update_order_status(&order_id, request.status)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order not found").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Environment};
    use crate::models::{CreateProductRequest, OrderStatus, User, UserRole};
    use crate::store::InMemoryStore;

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: id.to_string(),
            role,
        }
    }

    async fn seeded_state() -> (AppState, String) {
        let state = AppState::new(AppConfig::for_tests(Environment::Test), InMemoryStore::new());
        let product_id = {
            let mut store = state.store.write().await;
            store.insert_user(user("customer_1", UserRole::Customer));
            store.insert_user(user("customer_2", UserRole::Customer));
            store.insert_user(user("staff_1", UserRole::Admin));
            store
                .create_product(CreateProductRequest {
                    name: "Mug".into(),
                    description: "ceramic".into(),
                    price_cents: 1200,
                })
                .expect("create product")
                .id
        };
        (state, product_id)
    }

    #[tokio::test]
    async fn create_order_records_the_current_user() {
        let (state, product_id) = seeded_state().await;
        let (status, Json(order)) = create_order(
            State(state.clone()),
            Extension(CurrentUser(user("customer_1", UserRole::Customer))),
            Json(CreateOrderRequest {
                product_id,
                quantity: 2,
            }),
        )
        .await
        .expect("order creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order.user_id, "customer_1");
        assert_eq!(order.total_cents, 2400);
    }

    #[tokio::test]
    async fn customers_only_see_their_own_orders() {
        let (state, product_id) = seeded_state().await;
        {
            let mut store = state.store.write().await;
            for owner in ["customer_1", "customer_2"] {
                store
                    .create_order(
                        owner,
                        CreateOrderRequest {
                            product_id: product_id.clone(),
                            quantity: 1,
                        },
                    )
                    .expect("create order");
            }
        }

        let Json(mine) = list_orders(
            State(state.clone()),
            Extension(CurrentUser(user("customer_1", UserRole::Customer))),
        )
        .await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, "customer_1");

        let Json(all) = list_orders(
            State(state),
            Extension(CurrentUser(user("staff_1", UserRole::Admin))),
        )
        .await;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn foreign_order_reads_as_not_found() {
        let (state, product_id) = seeded_state().await;
        let order = state
            .store
            .write()
            .await
            .create_order(
                "customer_2",
                CreateOrderRequest {
                    product_id,
                    quantity: 1,
                },
            )
            .expect("create order");

        let result = get_order(
            Path(order.id),
            State(state),
            Extension(CurrentUser(user("customer_1", UserRole::Customer))),
        )
        .await;
        match result {
            Err(PipelineError::App(err)) => assert_eq!(err.message, "Order not found"),
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_update_requires_admin() {
        let (state, product_id) = seeded_state().await;
        let order = state
            .store
            .write()
            .await
            .create_order(
                "customer_1",
                CreateOrderRequest {
                    product_id,
                    quantity: 1,
                },
            )
            .expect("create order");

        let denied = update_order_status(
            Path(order.id.clone()),
            State(state.clone()),
            Extension(CurrentUser(user("customer_1", UserRole::Customer))),
            Json(UpdateOrderStatusRequest {
                status: OrderStatus::Shipped,
            }),
        )
        .await;
        match denied {
            Err(PipelineError::App(err)) => {
                assert_eq!(err.status, StatusCode::FORBIDDEN);
            }
            other => panic!("expected forbidden, got {other:?}"),
        }

        let Json(updated) = update_order_status(
            Path(order.id),
            State(state),
            Extension(CurrentUser(user("staff_1", UserRole::Admin))),
            Json(UpdateOrderStatusRequest {
                status: OrderStatus::Shipped,
            }),
        )
        .await
        .expect("admin may update");
        assert_eq!(updated.status, OrderStatus::Shipped);
    }
}
