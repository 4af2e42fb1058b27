//! Presence-based admin session.
//!
//! The session is just two storage keys. Nothing here validates the token;
//! the backend's 401 is the authoritative signal (see `core::api`).

use crate::domain::model::AdminProfile;
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "adminToken";
pub const PROFILE_KEY: &str = "adminData";

#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn present(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.present(TOKEN_KEY)
    }

    /// Raw profile blob as stored.
    pub fn profile_raw(&self) -> Option<String> {
        self.present(PROFILE_KEY)
    }

    pub fn profile(&self) -> Option<AdminProfile> {
        self.profile_raw()
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.profile_raw().is_some()
    }

    pub fn establish(&self, token: &str, admin: &serde_json::Value) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(PROFILE_KEY, &serde_json::to_string(admin)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(PROFILE_KEY)?;
        Ok(())
    }
}
