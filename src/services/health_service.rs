use std::time::SystemTime;

use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a liveness payload while logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.require_store().await {
        Ok(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage health check failed");
            }
        }
        Err(_) => warn!("storage unavailable (degraded mode)"),
    }

    let timestamp = crate::dto::format_system_time(SystemTime::now());
    if state.is_degraded().await {
        HealthResponse::degraded(timestamp)
    } else {
        HealthResponse::healthy(timestamp)
    }
}
