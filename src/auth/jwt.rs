use std::{sync::Arc, time::Duration};

use chrono::Utc;

use crate::{
    auth::{
        checker::{bearer_token, AuthorizationChecker},
        claims::AuthClaims,
        jwks::{KeySetProvider, RemoteKeySet},
    },
    config::Config,
    errors::AuthError,
};

/// Verifies bearer tokens against the issuer's current key set.
#[derive(Clone)]
pub struct JwtService {
    checker: AuthorizationChecker,
    keys: Arc<dyn KeySetProvider>,
}

impl JwtService {
    pub fn new(checker: AuthorizationChecker, keys: Arc<dyn KeySetProvider>) -> Self {
        Self { checker, keys }
    }

    pub fn from_config(config: &Config) -> Self {
        let keys = RemoteKeySet::new(
            config.jwks_url.clone(),
            Duration::from_secs(config.jwks_cache_ttl_secs),
        );

        Self::new(
            AuthorizationChecker::new(config.issuer(), config.api_audience.clone()),
            Arc::new(keys),
        )
    }

    pub async fn authorize(
        &self,
        authorization_header: Option<&str>,
        required_permission: &str,
    ) -> Result<AuthClaims, AuthError> {
        // Reject header problems before touching the key set.
        let token = bearer_token(authorization_header)?;
        let keys = self.keys.key_set().await?;

        self.checker
            .verify(token, required_permission, &keys, Utc::now().timestamp())
    }
}
