// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory persistence collaborator.
//!
//! The rest of the pipeline only consumes this module through single-record
//! reads and writes; the session verifier in particular issues exactly one
//! `find_user_by_id` per request. Failures surface as [`DbError`], the tagged
//! equivalent of a database driver's error hierarchy, so downstream
//! classification switches on the tag rather than on foreign type identity.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CreateOrderRequest, CreateProductRequest, Order, OrderStatus, Product, User,
};

/// Database-layer failure, tagged at the persistence seam.
///
/// `Known` carries the driver error code (`P2002` unique violation, `P2003`
/// foreign-key violation, ...) plus the structured `meta` object drivers
/// attach to known errors. `Validation` carries the verbose query-validation
/// text whose useful part starts at the `Argument` marker.
#[derive(Debug, Clone, Error)]
pub enum DbError {
    #[error("known database error {code}: {message}")]
    Known {
        code: String,
        meta: Option<Value>,
        message: String,
    },
    #[error("unknown database error: {message}")]
    Unknown { message: String },
    #[error("query validation failed: {message}")]
    Validation { message: String },
}

/// In-memory store backing the API.
#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<String, User>,
    products: HashMap<String, Product>,
    orders: HashMap<String, Order>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Single-row lookup by primary key, consumed by session authentication.
    pub fn find_user_by_id(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub fn list_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn get_product(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }

    pub fn create_product(&mut self, request: CreateProductRequest) -> Result<Product, DbError> {
        if request.name.is_empty() {
            return Err(DbError::Validation {
                message: "Invalid `product.create()` invocation:\n\nArgument `name` must not be null."
                    .to_string(),
            });
        }
        if self.products.values().any(|p| p.name == request.name) {
            return Err(DbError::Known {
                code: "P2002".to_string(),
                meta: Some(json!({ "target": ["name"] })),
                message: "Unique constraint failed on the fields: (`name`)".to_string(),
            });
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            price_cents: request.price_cents,
        };
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub fn create_order(
        &mut self,
        user_id: &str,
        request: CreateOrderRequest,
    ) -> Result<Order, DbError> {
        if request.quantity == 0 {
            return Err(DbError::Validation {
                message:
                    "Invalid `order.create()` invocation:\n\nArgument `quantity` must be greater than or equal to 1."
                        .to_string(),
            });
        }

        let product = self.products.get(&request.product_id).ok_or_else(|| DbError::Known {
            code: "P2003".to_string(),
            meta: Some(json!({ "field_name": "product_id" })),
            message: "Foreign key constraint failed on the field: `product_id`".to_string(),
        })?;

        let total_cents = product
            .price_cents
            .checked_mul(i64::from(request.quantity))
            .ok_or_else(|| DbError::Unknown {
                message: "order total exceeds the supported range".to_string(),
            })?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            product_id: request.product_id,
            quantity: request.quantity,
            total_cents,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.values().cloned().collect()
    }

    pub fn orders_for_user(&self, user_id: &str) -> Vec<Order> {
        self.orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn get_order(&self, id: &str) -> Option<Order> {
        self.orders.get(id).cloned()
    }

    pub fn update_order_status(&mut self, id: &str, status: OrderStatus) -> Option<Order> {
        let order = self.orders.get_mut(id)?;
        order.status = status;
        Some(order.clone())
    }
}
