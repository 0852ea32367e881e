//! Authorization extractors for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use siteops_core::error::CoreError;
use siteops_core::roles::ROLE_ADMIN;

use crate::auth::gate::{authorize_read, ReadCaller, ReadCredentials, CONNECTOR_TOKEN_HEADER};
use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Caller admitted through the read gate (operator session or connector
/// token).
///
/// Use this as an extractor parameter in any read handler:
///
/// ```ignore
/// async fn my_handler(ReadAccess(caller): ReadAccess) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ReadAccess(pub ReadCaller);

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl FromRequestParts<AppState> for ReadAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = bearer_token(parts);

        let header_token = parts
            .headers
            .get(CONNECTOR_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        let query_token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|query| query.0.token);

        let configured_token = state.settings.get().connector.api_token;

        let credentials = ReadCredentials {
            bearer,
            header_token,
            query_token: query_token.as_deref(),
        };

        authorize_read(&credentials, &configured_token, &state.config.jwt)
            .map(ReadAccess)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not authorized".into())))
    }
}

/// Requires an operator session with the admin role. Rejects with a JSON
/// 401/403 -- for the operator-facing GET endpoints, where the admin
/// client can surface the error.
///
/// Write actions have a stricter, silent contract and go through
/// [`silent_operator`] instead.
pub struct RequireOperator(pub Claims);

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = bearer_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

        let claims = validate_token(session, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        if claims.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }

        Ok(RequireOperator(claims))
    }
}

/// The admin session behind a write action, or `None`.
///
/// Write handlers never produce an error body: a missing or insufficient
/// session makes the action a silent no-op, so this helper just reports
/// whether a valid admin session is present.
pub fn silent_operator(headers: &axum::http::HeaderMap, state: &AppState) -> Option<Claims> {
    let session = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))?;

    let claims = validate_token(session, &state.config.jwt).ok()?;

    (claims.role == ROLE_ADMIN).then_some(claims)
}

/// Bearer value of the `Authorization` header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
