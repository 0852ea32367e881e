//! Connector token generation and comparison.
//!
//! The connector token is a shared secret handed to non-interactive
//! consumers (e.g. a reporting dashboard connector). It is generated once
//! when missing and compared in constant time on every request.

use rand::Rng;
use subtle::ConstantTimeEq;

/// Length of the generated connector token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 32;

/// Generate a new random connector token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Compare a caller-supplied token against the configured one.
///
/// Constant-time over the token bytes; an empty token on either side never
/// matches, so an unconfigured store cannot be satisfied by an empty header.
pub fn tokens_match(configured: &str, supplied: &str) -> bool {
    if configured.is_empty() || supplied.is_empty() {
        return false;
    }

    configured.as_bytes().ct_eq(supplied.as_bytes()).into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
