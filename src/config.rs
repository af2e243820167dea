use std::env;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEV_AUTH0_DOMAIN: &str = "triad-dev.us.auth0.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub auth0_domain: String,
    pub api_audience: String,
    pub jwks_url: String,
    pub jwks_cache_ttl_secs: u64,
    pub questions_per_page: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let auth0_domain =
            env::var("AUTH0_DOMAIN").unwrap_or_else(|_| DEV_AUTH0_DOMAIN.to_string());

        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "triad-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwks_url: env::var("JWKS_URL")
                .unwrap_or_else(|_| format!("https://{}/.well-known/jwks.json", auth0_domain)),
            auth0_domain,
            api_audience: env::var("API_AUDIENCE").unwrap_or_else(|_| "drinks".to_string()),
            jwks_cache_ttl_secs: env::var("JWKS_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            questions_per_page: env::var("QUESTIONS_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Token issuer as Auth0 writes it into the `iss` claim.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth0_domain)
    }

    /// Rejects settings that only make sense on a developer machine.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.auth0_domain == DEV_AUTH0_DOMAIN {
            return Err(AppError::InternalError(
                "AUTH0_DOMAIN is using the development default. Set AUTH0_DOMAIN to your tenant."
                    .to_string(),
            ));
        }

        if self.questions_per_page <= 0 {
            return Err(AppError::InternalError(format!(
                "QUESTIONS_PER_PAGE must be positive, got {}",
                self.questions_per_page
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
            mongo_db_name: "triad-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            auth0_domain: "triad-test.us.auth0.com".to_string(),
            api_audience: "drinks".to_string(),
            jwks_url: "https://triad-test.us.auth0.com/.well-known/jwks.json".to_string(),
            jwks_cache_ttl_secs: 600,
            questions_per_page: 10,
        }
    }
}
