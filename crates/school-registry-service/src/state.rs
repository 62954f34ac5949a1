//! Application state.

use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use school_registry_store::Store;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Key for verifying bearer tokens, if a secret is configured.
    pub jwt_key: Option<DecodingKey>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let jwt_key = config
            .jwt_secret
            .as_ref()
            .map(|secret| DecodingKey::from_secret(secret.as_bytes()));

        if jwt_key.is_none() {
            tracing::warn!("JWT_SECRET not configured - all /api requests will be rejected");
        }

        Self {
            store,
            config,
            jwt_key,
        }
    }
}
