use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    auth::{Claims, require_staff},
    dto::{
        common::MessageResponse,
        flush::{
            AwardSuitRequest, AwardSuitResponse, FlushLeaderboardResponse, JackpotsResponse,
        },
    },
    error::AppError,
    services::flush_service,
    state::SharedState,
};

/// Flush promotion endpoints; suit awards and resets are staff-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/flush/{player_id}/suit", post(award_suit))
        .route("/flush/reset", delete(reset))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/flush/leaderboard", get(leaderboard))
        .route("/flush/jackpots", get(jackpots))
        .merge(staff)
}

/// Today's collectors for the session in progress.
#[utoipa::path(
    get,
    path = "/api/flush/leaderboard",
    tag = "flush",
    responses((status = 200, description = "Session leaderboard", body = FlushLeaderboardResponse))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<FlushLeaderboardResponse>, AppError> {
    Ok(Json(flush_service::leaderboard(&state).await?))
}

/// Current jackpot amounts.
#[utoipa::path(
    get,
    path = "/api/flush/jackpots",
    tag = "flush",
    responses((status = 200, description = "Jackpots", body = JackpotsResponse))
)]
pub async fn jackpots(State(state): State<SharedState>) -> Result<Json<JackpotsResponse>, AppError> {
    Ok(Json(flush_service::jackpots(&state).await?))
}

/// Award a suit to a player.
#[utoipa::path(
    post,
    path = "/api/flush/{player_id}/suit",
    tag = "flush",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("player_id" = Uuid, Path, description = "Player identifier")),
    request_body = AwardSuitRequest,
    responses(
        (status = 200, description = "Suit recorded", body = AwardSuitResponse),
        (status = 400, description = "No session in progress"),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn award_suit(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(player_id): Path<Uuid>,
    Json(payload): Json<AwardSuitRequest>,
) -> Result<Json<AwardSuitResponse>, AppError> {
    Ok(Json(
        flush_service::award_suit(&state, &claims, player_id, payload).await?,
    ))
}

/// Wipe all flush progress.
#[utoipa::path(
    delete,
    path = "/api/flush/reset",
    tag = "flush",
    params(("Authorization" = String, Header, description = "Staff bearer token")),
    responses((status = 200, description = "Progress reset", body = MessageResponse))
)]
pub async fn reset(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(flush_service::reset(&state, &claims).await?))
}
