use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;

use crate::errors::{AppError, AppResult, AuthError};

/// Source of the signing keys trusted for bearer tokens.
#[async_trait]
pub trait KeySetProvider: Send + Sync {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError>;
}

/// A fixed key set, for tests and deployments that pin their keys.
pub struct StaticKeySet {
    keys: Arc<JwkSet>,
}

impl StaticKeySet {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let keys: JwkSet = serde_json::from_str(json)
            .map_err(|e| AppError::InternalError(format!("Invalid JWKS document: {}", e)))?;
        Ok(Self::new(keys))
    }
}

#[async_trait]
impl KeySetProvider for StaticKeySet {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        Ok(Arc::clone(&self.keys))
    }
}

struct CachedKeys {
    keys: Arc<JwkSet>,
    fetched_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Fetches the issuer's published JWKS and caches it for `ttl`.
pub struct RemoteKeySet {
    url: String,
    ttl: Duration,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl RemoteKeySet {
    pub fn new(url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            url: url.into(),
            ttl,
            client: reqwest::Client::new(),
            cache: RwLock::new(None),
        }
    }

    async fn fetch(&self) -> Result<JwkSet, reqwest::Error> {
        self.client
            .get(&self.url)
            .timeout(Duration::from_secs(5))
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await
    }
}

#[async_trait]
impl KeySetProvider for RemoteKeySet {
    async fn key_set(&self) -> Result<Arc<JwkSet>, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(self.ttl)) {
                return Ok(Arc::clone(&cached.keys));
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(self.ttl)) {
            return Ok(Arc::clone(&cached.keys));
        }

        match self.fetch().await {
            Ok(keys) => {
                log::debug!("Fetched {} signing keys from {}", keys.keys.len(), self.url);
                let keys = Arc::new(keys);
                *cache = Some(CachedKeys {
                    keys: Arc::clone(&keys),
                    fetched_at: Instant::now(),
                });
                Ok(keys)
            }
            Err(e) => match cache.as_ref() {
                Some(stale) => {
                    log::warn!("JWKS refresh from {} failed, serving stale keys: {}", self.url, e);
                    Ok(Arc::clone(&stale.keys))
                }
                None => {
                    log::error!("JWKS fetch from {} failed: {}", self.url, e);
                    Err(AuthError::KeySetUnavailable(e.to_string()))
                }
            },
        }
    }
}
