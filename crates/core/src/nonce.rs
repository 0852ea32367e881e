//! Anti-forgery nonces for operator write actions.
//!
//! A nonce is an HMAC-SHA256 over `action:user_id` keyed with the server
//! secret, hex-encoded and truncated. Operator GET endpoints hand the nonce
//! to the admin client; the matching save action must echo it back.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of an issued nonce in hex characters.
pub const NONCE_LENGTH: usize = 16;

/// Issue the nonce for one `(action, user)` pair.
pub fn issue_nonce(secret: &str, action: &str, user_id: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(action.as_bytes());
    mac.update(b":");
    mac.update(user_id.to_string().as_bytes());

    let digest = hex::encode(mac.finalize().into_bytes());
    digest[..NONCE_LENGTH].to_string()
}

/// Verify a supplied nonce against the expected one, in constant time.
pub fn verify_nonce(secret: &str, action: &str, user_id: i64, supplied: &str) -> bool {
    let expected = issue_nonce(secret, action, user_id);
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
