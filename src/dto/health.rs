use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/api/health` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("healthy" or "degraded").
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn healthy(timestamp: String) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp,
        }
    }

    /// Create a health response indicating the system is in degraded mode.
    pub fn degraded(timestamp: String) -> Self {
        Self {
            status: "degraded".to_string(),
            timestamp,
        }
    }
}
