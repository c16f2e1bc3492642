// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::SessionDecoder;
use crate::config::AppConfig;
use crate::store::InMemoryStore;

/// Shared application state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<RwLock<InMemoryStore>>,
    pub sessions: SessionDecoder,
}

impl AppState {
    pub fn new(config: AppConfig, store: InMemoryStore) -> Self {
        let sessions = SessionDecoder::new(&config.auth_secret);
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[tokio::test]
    async fn state_clones_share_the_store() {
        let state = AppState::new(AppConfig::for_tests(Environment::Test), InMemoryStore::new());
        let clone = state.clone();

        state.store.write().await.insert_user(crate::models::User {
            id: "u1".into(),
            email: "shopper@example.com".into(),
            name: "Shopper".into(),
            role: crate::models::UserRole::Customer,
        });

        assert!(clone.store.read().await.find_user_by_id("u1").is_some());
    }
}
