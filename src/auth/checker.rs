use jsonwebtoken::{
    decode, decode_header,
    errors::ErrorKind,
    jwk::JwkSet,
    Algorithm, DecodingKey, Validation,
};

use crate::{auth::claims::AuthClaims, errors::AuthError};

/// Decides whether a bearer credential grants a permission.
///
/// Pure over its inputs: the trusted key set and the current time are passed
/// in, nothing is cached or mutated here.
#[derive(Debug, Clone)]
pub struct AuthorizationChecker {
    issuer: String,
    audience: String,
}

impl AuthorizationChecker {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn authorize(
        &self,
        authorization_header: Option<&str>,
        required_permission: &str,
        keys: &JwkSet,
        now: i64,
    ) -> Result<AuthClaims, AuthError> {
        let token = bearer_token(authorization_header)?;
        self.verify(token, required_permission, keys, now)
    }

    pub fn verify(
        &self,
        token: &str,
        required_permission: &str,
        keys: &JwkSet,
        now: i64,
    ) -> Result<AuthClaims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::InvalidHeader("Unable to parse authentication token".into()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidHeader(format!(
                "Unsupported signing algorithm {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidHeader("Token header has no key id".into()))?;

        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidHeader("Unable to find the appropriate key".into()))?;

        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::InvalidHeader(format!("Unusable signing key: {}", e)))?;

        let claims = decode::<AuthClaims>(token, &key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    AuthError::ClaimsMismatch(e.to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    AuthError::InvalidClaims(format!("Missing required claim '{}'", claim))
                }
                ErrorKind::Json(_) => AuthError::InvalidClaims(e.to_string()),
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidHeader("Unable to parse authentication token".into()),
            })?;

        if claims.exp <= now {
            return Err(AuthError::Expired);
        }

        if claims.permissions.is_none() {
            return Err(AuthError::InvalidClaims(
                "Permissions not included in token".into(),
            ));
        }

        if !claims.has_permission(required_permission) {
            return Err(AuthError::PermissionDenied(required_permission.to_string()));
        }

        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // Expiry is compared against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` value.
pub fn bearer_token(authorization_header: Option<&str>) -> Result<&str, AuthError> {
    let header = authorization_header
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::InvalidHeader("Authorization header must start with \"Bearer\"".into()),
        ),
        (Some(_), None, _) => Err(AuthError::InvalidHeader("Token not found".into())),
        _ => Err(AuthError::InvalidHeader(
            "Authorization header must be a bearer token".into(),
        )),
    }
}
