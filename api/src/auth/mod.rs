pub mod extractors;
pub mod middleware;

use services::session::SessionClaims;

/// Claims of the caller's verified session token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaims);
