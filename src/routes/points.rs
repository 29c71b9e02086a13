use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};

use crate::{
    auth::{Claims, require_staff},
    dto::points::{AwardPointsRequest, AwardPointsResponse, LeaderboardResponse, Top30Response},
    error::AppError,
    services::points_service,
    state::SharedState,
};

/// Points and leaderboard endpoints; awards are staff-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/points/award", post(award_points))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/points/leaderboard", get(leaderboard))
        .route("/points/top30", get(top30))
        .merge(staff)
}

/// Full leaderboard; rewrites player ranks as a side effect.
#[utoipa::path(
    get,
    path = "/api/points/leaderboard",
    tag = "points",
    responses((status = 200, description = "Leaderboard", body = LeaderboardResponse))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    Ok(Json(points_service::leaderboard(&state).await?))
}

/// Points needed for the top thirty.
#[utoipa::path(
    get,
    path = "/api/points/top30",
    tag = "points",
    responses((status = 200, description = "Top-30 cutoff", body = Top30Response))
)]
pub async fn top30(State(state): State<SharedState>) -> Result<Json<Top30Response>, AppError> {
    Ok(Json(points_service::top30(&state).await?))
}

/// Award bonus points to a player.
#[utoipa::path(
    post,
    path = "/api/points/award",
    tag = "points",
    params(("Authorization" = String, Header, description = "Staff bearer token")),
    request_body = AwardPointsRequest,
    responses(
        (status = 200, description = "Points awarded", body = AwardPointsResponse),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn award_points(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AwardPointsRequest>,
) -> Result<Json<AwardPointsResponse>, AppError> {
    Ok(Json(points_service::award(&state, &claims, payload).await?))
}
