use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::{delete, get, put},
};
use uuid::Uuid;

use crate::{
    auth::{Claims, require_staff},
    dto::{
        common::MessageResponse,
        waitlist::{
            CallPlayerResponse, JoinWaitlistRequest, JoinWaitlistResponse, SeatFromWaitlistRequest,
            SeatedFromWaitlistResponse, WaitlistEntrySummary, WaitlistOverviewResponse,
        },
    },
    error::AppError,
    services::waitlist_service,
    state::SharedState,
};

/// Waitlist endpoints. Joining and reading are public; queue management is
/// staff-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/waitlist/{id}/call", put(call_player))
        .route("/waitlist/{id}/seat", put(seat_player))
        .route("/waitlist/{id}", delete(remove_entry))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/waitlist", get(overview).post(join))
        // Read side uses the same `{id}` slot for a game code.
        .route("/waitlist/{id}", get(for_game))
        .route("/waitlist/player/{card_number}", get(for_card))
        .merge(staff)
}

/// All active queues grouped by game.
#[utoipa::path(
    get,
    path = "/api/waitlist",
    tag = "waitlist",
    responses((status = 200, description = "Active waitlists by game", body = WaitlistOverviewResponse))
)]
pub async fn overview(
    State(state): State<SharedState>,
) -> Result<Json<WaitlistOverviewResponse>, AppError> {
    Ok(Json(waitlist_service::overview(&state).await?))
}

/// The active queue for one game.
#[utoipa::path(
    get,
    path = "/api/waitlist/{id}",
    tag = "waitlist",
    params(("id" = String, Path, description = "Game code")),
    responses((status = 200, description = "Queue entries in position order", body = [WaitlistEntrySummary]))
)]
pub async fn for_game(
    State(state): State<SharedState>,
    Path(game_code): Path<String>,
) -> Result<Json<Vec<WaitlistEntrySummary>>, AppError> {
    Ok(Json(waitlist_service::for_game(&state, game_code).await?))
}

/// Active entries held by a loyalty card.
#[utoipa::path(
    get,
    path = "/api/waitlist/player/{card_number}",
    tag = "waitlist",
    params(("card_number" = String, Path, description = "Loyalty card number")),
    responses((status = 200, description = "Active entries for the card", body = [WaitlistEntrySummary]))
)]
pub async fn for_card(
    State(state): State<SharedState>,
    Path(card_number): Path<String>,
) -> Result<Json<Vec<WaitlistEntrySummary>>, AppError> {
    Ok(Json(waitlist_service::for_card(&state, card_number).await?))
}

/// Join a game's waitlist.
#[utoipa::path(
    post,
    path = "/api/waitlist",
    tag = "waitlist",
    request_body = JoinWaitlistRequest,
    responses(
        (status = 200, description = "Added to the queue", body = JoinWaitlistResponse),
        (status = 404, description = "Unknown game code")
    )
)]
pub async fn join(
    State(state): State<SharedState>,
    Json(payload): Json<JoinWaitlistRequest>,
) -> Result<Json<JoinWaitlistResponse>, AppError> {
    Ok(Json(waitlist_service::join(&state, payload).await?))
}

/// Call a player to a seat.
#[utoipa::path(
    put,
    path = "/api/waitlist/{id}/call",
    tag = "waitlist",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Waitlist entry identifier")),
    responses(
        (status = 200, description = "Player called", body = CallPlayerResponse),
        (status = 404, description = "Unknown entry")
    )
)]
pub async fn call_player(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<CallPlayerResponse>, AppError> {
    Ok(Json(waitlist_service::call(&state, &claims, id).await?))
}

/// Seat a waitlisted player and compact the queue behind them.
#[utoipa::path(
    put,
    path = "/api/waitlist/{id}/seat",
    tag = "waitlist",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Waitlist entry identifier")),
    request_body = SeatFromWaitlistRequest,
    responses(
        (status = 200, description = "Player seated", body = SeatedFromWaitlistResponse),
        (status = 404, description = "Unknown entry")
    )
)]
pub async fn seat_player(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SeatFromWaitlistRequest>,
) -> Result<Json<SeatedFromWaitlistResponse>, AppError> {
    Ok(Json(
        waitlist_service::seat(&state, &claims, id, payload).await?,
    ))
}

/// Remove an entry from its queue.
#[utoipa::path(
    delete,
    path = "/api/waitlist/{id}",
    tag = "waitlist",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Waitlist entry identifier")),
    responses(
        (status = 200, description = "Entry removed", body = MessageResponse),
        (status = 404, description = "Unknown entry")
    )
)]
pub async fn remove_entry(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(waitlist_service::remove(&state, &claims, id).await?))
}
