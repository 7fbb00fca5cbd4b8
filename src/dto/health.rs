use serde::Serialize;
use utoipa::ToSchema;

/// Response payload for the health endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Storage backend reachability.
    pub storage: &'static str,
}

impl HealthResponse {
    /// Everything reachable.
    pub fn ok() -> Self {
        Self {
            status: "ok",
            storage: "ok",
        }
    }

    /// Service is up but the storage backend is not.
    pub fn degraded() -> Self {
        Self {
            status: "degraded",
            storage: "unavailable",
        }
    }
}
