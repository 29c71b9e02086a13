use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    auth::require_admin,
    dto::{
        common::MessageResponse,
        game::{CashGameSummary, CreateGameRequest, UpdateGameRequest},
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Cash-game catalog endpoints; mutation is admin-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let admin = Router::new()
        .route("/games", post(create_game))
        .route("/games/{id}", put(update_game).delete(deactivate_game))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new().route("/games", get(list_games)).merge(admin)
}

/// List the active game catalog.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses((status = 200, description = "Active games", body = [CashGameSummary]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<CashGameSummary>>, AppError> {
    Ok(Json(game_service::list(&state).await?))
}

/// Add a catalog entry.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    params(("Authorization" = String, Header, description = "Admin bearer token")),
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = CashGameSummary),
        (status = 409, description = "Duplicate game code")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<CashGameSummary>, AppError> {
    Ok(Json(game_service::create(&state, payload).await?))
}

/// Amend a catalog entry.
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = "games",
    params(("Authorization" = String, Header, description = "Admin bearer token"),
    ("id" = Uuid, Path, description = "Game identifier")),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated", body = CashGameSummary),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGameRequest>,
) -> Result<Json<CashGameSummary>, AppError> {
    Ok(Json(game_service::update(&state, id, payload).await?))
}

/// Soft-deactivate a catalog entry.
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = "games",
    params(("Authorization" = String, Header, description = "Admin bearer token"),
    ("id" = Uuid, Path, description = "Game identifier")),
    responses((status = 200, description = "Game deactivated", body = MessageResponse))
)]
pub async fn deactivate_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(game_service::deactivate(&state, id).await?))
}
