// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures for the storefront API. All types
//! derive `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: customer accounts resolved during session authentication
//! - **Products**: the catalog
//! - **Orders**: purchases placed by authenticated users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Users
// =============================================================================

/// Role attached to a user account.
///
/// - `Admin` - store staff: full catalog and order management
/// - `Customer` - normal shopper: sees only their own orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Store staff with full access.
    Admin,
    /// Normal shopper.
    Customer,
}

/// A persisted user account.
///
/// Resolved from the session-token subject id and attached to the request
/// for the lifetime of that request only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Primary key; matches the `sub` claim of the session token.
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// =============================================================================
// Products
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    /// Display name; unique across the catalog.
    pub name: String,
    pub description: String,
    /// Unit price in the smallest currency denomination.
    pub price_cents: i64,
}

/// Payload for creating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    /// Owner of the order.
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    /// `quantity * unit price` at the time the order was placed.
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// Payload for updating an order's fulfillment state (admin only).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).expect("serialize role"),
            r#""admin""#
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).expect("serialize status"),
            r#""pending""#
        );
    }

    #[test]
    fn admin_check_follows_role() {
        let admin = User {
            id: "u1".into(),
            email: "staff@example.com".into(),
            name: "Staff".into(),
            role: UserRole::Admin,
        };
        let customer = User {
            role: UserRole::Customer,
            ..admin.clone()
        };
        assert!(admin.is_admin());
        assert!(!customer.is_admin());
    }
}
