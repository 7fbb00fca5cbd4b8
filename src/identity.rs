//! Identity collaborator seam: resolves the opaque caller token carried on
//! each request to a stable participant id.
//!
//! Authentication itself is out of scope; tokens issued by the identity
//! service are opaque UUIDs from this core's point of view, so resolution
//! is a parse. Swapping in a real verifier only touches this module.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

const AUTHORIZATION: &str = "authorization";
const BEARER_PREFIX: &str = "Bearer ";

/// Stable participant id resolved from the request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerId(pub Uuid);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<S> FromRequestParts<S> for PlayerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| AppError::Unauthorized("malformed authorization header".into()))?;

        let id = token
            .trim()
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthorized("unresolvable caller token".into()))?;

        Ok(PlayerId(id))
    }
}
