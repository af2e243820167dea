use serde::{Deserialize, Serialize};

/// `aud` may be a single string or a list (Auth0 adds its userinfo audience).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: String, // Subject (Auth0 user id)
    pub iss: String,
    pub aud: Audience,
    pub exp: i64, // Expiration time (as UTC timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    // Absent when RBAC is not enabled for the API; rejected by the checker.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl AuthClaims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .map(|perms| perms.iter().any(|p| p == permission))
            .unwrap_or(false)
    }
}
