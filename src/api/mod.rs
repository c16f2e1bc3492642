// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP API router.
//!
//! Layer order matters: the error boundary wraps every route, including the
//! session-authentication layer on the protected subtree, so it is the last
//! stage any failure can reach. CORS, tracing, and request ids sit outside
//! the boundary and apply uniformly.

use axum::{
    http::{header, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth, classifier,
    config::AppConfig,
    models::{
        CreateOrderRequest, CreateProductRequest, Order, OrderStatus, Product,
        UpdateOrderStatusRequest, User, UserRole,
    },
    state::AppState,
};

pub mod admin;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(products::list_products))
        .route("/api/products/{product_id}", get(products::get_product));

    let protected = Router::new()
        .route("/api/me", get(users::current_user))
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/{order_id}", get(orders::get_order))
        .route(
            "/api/orders/{order_id}/status",
            patch(orders::update_order_status),
        )
        .route("/api/admin/products", post(admin::create_product))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let routes = Router::new()
        .merge(public)
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            classifier::error_boundary,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Exact-origin CORS with credentials when a frontend origin is configured,
/// fully permissive otherwise (local development).
fn cors_layer(config: &AppConfig) -> CorsLayer {
    match &config.frontend_url {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        products::list_products,
        products::get_product,
        users::current_user,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        admin::create_product
    ),
    components(
        schemas(
            User,
            UserRole,
            Product,
            Order,
            OrderStatus,
            CreateProductRequest,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness probes"),
        (name = "Products", description = "Public catalog"),
        (name = "Orders", description = "Order management"),
        (name = "Users", description = "Account endpoints"),
        (name = "Admin", description = "Staff-only catalog management")
    )
)]
struct ApiDoc;
