use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::public::{DisplayFlushResponse, DisplayGameStatus, LiveStatusResponse},
    error::AppError,
    services::public_service,
    state::SharedState,
};

/// Unauthenticated aggregates for the lobby and wall displays.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/live-status", get(live_status))
        .route("/display/waitlist", get(display_waitlist))
        .route("/display/flush", get(display_flush))
}

/// Floor occupancy snapshot.
#[utoipa::path(
    get,
    path = "/api/live-status",
    tag = "public",
    responses((status = 200, description = "Occupancy snapshot", body = LiveStatusResponse))
)]
pub async fn live_status(
    State(state): State<SharedState>,
) -> Result<Json<LiveStatusResponse>, AppError> {
    Ok(Json(public_service::live_status(&state).await?))
}

/// Waitlist board payload.
#[utoipa::path(
    get,
    path = "/api/display/waitlist",
    tag = "public",
    responses((status = 200, description = "Per-game board data", body = [DisplayGameStatus]))
)]
pub async fn display_waitlist(
    State(state): State<SharedState>,
) -> Result<Json<Vec<DisplayGameStatus>>, AppError> {
    Ok(Json(public_service::display_waitlist(&state).await?))
}

/// Flush board payload.
#[utoipa::path(
    get,
    path = "/api/display/flush",
    tag = "public",
    responses((status = 200, description = "Flush board data", body = DisplayFlushResponse))
)]
pub async fn display_flush(
    State(state): State<SharedState>,
) -> Result<Json<DisplayFlushResponse>, AppError> {
    Ok(Json(public_service::display_flush(&state).await?))
}
