use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    auth::{Claims, require_staff},
    dto::tournament::{
        CreateTournamentRequest, RegisterRequest, RegisterResponse, TournamentDetailResponse,
        TournamentSummary,
    },
    error::AppError,
    services::tournament_service,
    state::SharedState,
};

/// Tournament endpoints; scheduling is staff-only, registration is open.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/tournaments", post(create_tournament))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/tournaments", get(list_tournaments))
        .route("/tournaments/{id}", get(get_tournament))
        .route("/tournaments/{id}/register", post(register))
        .merge(staff)
}

/// List active tournaments.
#[utoipa::path(
    get,
    path = "/api/tournaments",
    tag = "tournaments",
    responses((status = 200, description = "Active tournaments", body = [TournamentSummary]))
)]
pub async fn list_tournaments(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TournamentSummary>>, AppError> {
    Ok(Json(tournament_service::list(&state).await?))
}

/// Fetch one tournament with its registrations.
#[utoipa::path(
    get,
    path = "/api/tournaments/{id}",
    tag = "tournaments",
    params(("id" = Uuid, Path, description = "Tournament identifier")),
    responses(
        (status = 200, description = "Tournament detail", body = TournamentDetailResponse),
        (status = 404, description = "Unknown tournament")
    )
)]
pub async fn get_tournament(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TournamentDetailResponse>, AppError> {
    Ok(Json(tournament_service::detail(&state, id).await?))
}

/// Schedule a tournament.
#[utoipa::path(
    post,
    path = "/api/tournaments",
    tag = "tournaments",
    params(("Authorization" = String, Header, description = "Staff bearer token")),
    request_body = CreateTournamentRequest,
    responses((status = 200, description = "Tournament created", body = TournamentSummary))
)]
pub async fn create_tournament(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateTournamentRequest>,
) -> Result<Json<TournamentSummary>, AppError> {
    Ok(Json(
        tournament_service::create(&state, &claims, payload).await?,
    ))
}

/// Register for a tournament; one sign-up per phone number.
#[utoipa::path(
    post,
    path = "/api/tournaments/{id}/register",
    tag = "tournaments",
    params(("id" = Uuid, Path, description = "Tournament identifier")),
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = RegisterResponse),
        (status = 404, description = "Unknown tournament"),
        (status = 409, description = "Phone already registered")
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    Ok(Json(tournament_service::register(&state, id, payload).await?))
}
