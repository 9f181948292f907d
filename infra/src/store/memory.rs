//! In-process token store

use std::collections::HashMap;

use async_trait::async_trait;
use fint_core::services::SessionStoreTrait;
use fint_shared::utils::email::normalize_email;
use tokio::sync::RwLock;

/// Token store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Token saved for an account, if any
    pub async fn load_token(&self, email: &str) -> Option<String> {
        self.tokens.read().await.get(&normalize_email(email)).cloned()
    }
}

#[async_trait]
impl SessionStoreTrait for MemorySessionStore {
    async fn save_token(&self, email: &str, token: &str) -> Result<(), String> {
        self.tokens
            .write()
            .await
            .insert(normalize_email(email), token.to_string());
        Ok(())
    }
}
