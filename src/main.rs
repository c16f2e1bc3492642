// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use storefront_server::api::router;
use storefront_server::config::{AppConfig, ConfigError};
use storefront_server::models::{User, UserRole};
use storefront_server::state::AppState;
use storefront_server::store::InMemoryStore;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::Invalid { issues }) => {
            for issue in &issues {
                tracing::error!(%issue, "invalid environment variable");
            }
            std::process::exit(1);
        }
    };
    tracing::info!(environment = %config.environment, "configuration validated");

    let mut store = InMemoryStore::new();
    if let Ok(id) = env::var("SEED_ADMIN_ID") {
        let email =
            env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        store.insert_user(User {
            id,
            email,
            name: "Admin".to_string(),
            role: UserRole::Admin,
        });
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let state = AppState::new(config, store);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Storefront server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// `RUST_LOG` controls the filter; `LOG_FORMAT=json` switches to structured
/// output for production log shipping.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}
