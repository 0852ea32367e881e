//! The read-access gate: one authorization decision per request.
//!
//! Strategies run in order and short-circuit on the first definitive
//! allow: an interactive operator session with administrative capability,
//! then the shared connector token. A strategy that cannot decide
//! abstains; when every strategy abstains the request is denied. Denial
//! carries no detail about how close a supplied token was.

use siteops_core::roles::ROLE_ADMIN;
use siteops_core::token;

use crate::auth::jwt::{validate_token, JwtConfig};

/// Header carrying the connector token. Checked before the `token` query
/// parameter; both are accepted.
pub const CONNECTOR_TOKEN_HEADER: &str = "x-connector-token";

/// Query parameter carrying the connector token.
pub const CONNECTOR_TOKEN_PARAM: &str = "token";

/// Who was allowed through the read gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadCaller {
    /// An interactive operator with administrative capability.
    Operator { user_id: i64 },
    /// A machine consumer holding the shared connector token.
    Connector,
}

/// One strategy's verdict.
enum Decision {
    Allow(ReadCaller),
    Abstain,
}

/// Everything a read-authorization decision looks at, already pulled out
/// of the request.
#[derive(Debug, Default)]
pub struct ReadCredentials<'a> {
    /// Bearer value of the `Authorization` header, if any.
    pub bearer: Option<&'a str>,
    /// Connector token from the request header, if any.
    pub header_token: Option<&'a str>,
    /// Connector token from the query string, if any.
    pub query_token: Option<&'a str>,
}

/// Run the strategy chain. `None` means denied.
pub fn authorize_read(
    credentials: &ReadCredentials<'_>,
    configured_token: &str,
    jwt: &JwtConfig,
) -> Option<ReadCaller> {
    let strategies = [
        session_strategy(credentials.bearer, jwt),
        connector_strategy(
            credentials.header_token,
            credentials.query_token,
            configured_token,
        ),
    ];

    for decision in strategies {
        if let Decision::Allow(caller) = decision {
            return Some(caller);
        }
    }

    None
}

/// Allow an operator session carrying the admin role. Invalid, expired,
/// or non-admin sessions abstain so the connector strategy still gets a
/// look.
fn session_strategy(bearer: Option<&str>, jwt: &JwtConfig) -> Decision {
    let Some(session) = bearer else {
        return Decision::Abstain;
    };

    let Ok(claims) = validate_token(session, jwt) else {
        return Decision::Abstain;
    };

    if claims.role == ROLE_ADMIN {
        Decision::Allow(ReadCaller::Operator {
            user_id: claims.sub,
        })
    } else {
        Decision::Abstain
    }
}

/// Allow an exact, non-empty match of the configured connector token,
/// from the header first, then the query parameter. Comparison is
/// constant-time.
fn connector_strategy(
    header_token: Option<&str>,
    query_token: Option<&str>,
    configured_token: &str,
) -> Decision {
    for supplied in [header_token, query_token].into_iter().flatten() {
        if token::tokens_match(configured_token, supplied) {
            return Decision::Allow(ReadCaller::Connector);
        }
    }

    Decision::Abstain
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
