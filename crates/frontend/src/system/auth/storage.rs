use contracts::system::auth::TokenPair;

use crate::shared::config::config;
use crate::shared::storage::{BrowserStorage, KeyValueStorage};

/// Access and refresh tokens, persisted under two keys and always cleared together
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    storage: S,
    access_key: String,
    refresh_key: String,
}

impl TokenStore<BrowserStorage> {
    pub fn browser() -> Self {
        let auth = &config().auth;
        Self::new(
            BrowserStorage,
            auth.access_token_key.clone(),
            auth.refresh_token_key.clone(),
        )
    }
}

impl<S: KeyValueStorage> TokenStore<S> {
    pub fn new(storage: S, access_key: impl Into<String>, refresh_key: impl Into<String>) -> Self {
        Self {
            storage,
            access_key: access_key.into(),
            refresh_key: refresh_key.into(),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(&self.access_key).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(&self.refresh_key).filter(|t| !t.is_empty())
    }

    pub fn save(&self, tokens: &TokenPair) {
        self.storage.set(&self.access_key, &tokens.access_token);
        self.storage.set(&self.refresh_key, &tokens.refresh_token);
    }

    pub fn clear(&self) {
        self.storage.remove(&self.access_key);
        self.storage.remove(&self.refresh_key);
    }
}
