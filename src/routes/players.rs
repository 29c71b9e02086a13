use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    auth::{Claims, require_staff},
    dto::player::{CheckinResponse, CheckoutResponse, PlayerSearchQuery, PlayerSummary},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Player lookup and checkin/checkout endpoints.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/players/{id}/checkin", post(checkin))
        .route("/players/{id}/checkout", post(checkout))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/players", get(list_players))
        .route("/players/{id}", get(get_player))
        .route("/players/card/{card_number}", get(get_player_by_card))
        .merge(staff)
}

/// List players, optionally filtered by name or card number.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    params(("search" = Option<String>, Query, description = "Name prefix or card substring")),
    responses((status = 200, description = "Matching players", body = [PlayerSummary]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
    Query(query): Query<PlayerSearchQuery>,
) -> Result<Json<Vec<PlayerSummary>>, AppError> {
    Ok(Json(player_service::list(&state, query.search).await?))
}

/// Fetch one player by id.
#[utoipa::path(
    get,
    path = "/api/players/{id}",
    tag = "players",
    params(("id" = Uuid, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Player", body = PlayerSummary),
        (status = 404, description = "Unknown player")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(player_service::get(&state, id).await?))
}

/// Fetch one player by loyalty card number.
#[utoipa::path(
    get,
    path = "/api/players/card/{card_number}",
    tag = "players",
    params(("card_number" = String, Path, description = "Loyalty card number")),
    responses(
        (status = 200, description = "Player", body = PlayerSummary),
        (status = 404, description = "Unknown card")
    )
)]
pub async fn get_player_by_card(
    State(state): State<SharedState>,
    Path(card_number): Path<String>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(player_service::get_by_card(&state, card_number).await?))
}

/// Open a floor session for a player.
#[utoipa::path(
    post,
    path = "/api/players/{id}/checkin",
    tag = "players",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Player identifier")),
    responses((status = 200, description = "Checked in", body = CheckinResponse))
)]
pub async fn checkin(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckinResponse>, AppError> {
    Ok(Json(player_service::checkin(&state, &claims, id).await?))
}

/// Close a player's floor session and award time-based points.
#[utoipa::path(
    post,
    path = "/api/players/{id}/checkout",
    tag = "players",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Player identifier")),
    responses(
        (status = 200, description = "Checked out", body = CheckoutResponse),
        (status = 400, description = "No active check-in")
    )
)]
pub async fn checkout(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>, AppError> {
    Ok(Json(player_service::checkout(&state, &claims, id).await?))
}
