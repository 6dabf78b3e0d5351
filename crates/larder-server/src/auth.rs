use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read credentials from an `Authorization: Bearer <token>` header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| {
                let (scheme, token) = v.trim().split_once(' ')?;
                scheme
                    .eq_ignore_ascii_case("bearer")
                    .then(|| token.trim().to_string())
            })
            .filter(|t| !t.is_empty())
            .map(Self::Bearer)
            .unwrap_or(Self::Anonymous)
    }
}

/// Reject requests whose bearer token does not match the configured API key.
/// Every request passes when no key is configured.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ServerResult<Response> {
    let Some(expected) = state.api_key else {
        return Ok(next.run(request).await);
    };
    match Credentials::from_headers(request.headers()) {
        Credentials::Bearer(token) if blake3::hash(token.as_bytes()) == expected => {
            Ok(next.run(request).await)
        }
        Credentials::Bearer(_) => Err(ServerError::Unauthorized("invalid bearer token".into())),
        Credentials::Anonymous => Err(ServerError::Unauthorized("missing bearer token".into())),
    }
}
