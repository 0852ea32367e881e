//! Operator role names carried in session token claims.

/// Full administrative capability: settings and site-metadata writes, plus
/// every read endpoint without a connector token.
pub const ROLE_ADMIN: &str = "admin";

/// Read-only operator. Viewers hold a session but no administrative
/// capability, so they go through the connector-token path like any other
/// machine consumer.
pub const ROLE_VIEWER: &str = "viewer";
