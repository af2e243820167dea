pub mod checker;
pub mod claims;
pub mod jwks;
pub mod jwt;
pub mod middleware;

pub use checker::{bearer_token, AuthorizationChecker};
pub use claims::{Audience, AuthClaims};
pub use jwks::{KeySetProvider, RemoteKeySet, StaticKeySet};
pub use jwt::JwtService;
pub use middleware::{AuthenticatedUser, RequirePermission};

/// Permissions granted by the cafe's identity provider.
pub mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}
