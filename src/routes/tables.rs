use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
};

use crate::{
    auth::{Claims, require_staff},
    dto::{
        common::MessageResponse,
        table::{OpenTableRequest, SeatPlayerRequest, SeatSummary, TableSummary},
    },
    error::AppError,
    services::table_service,
    state::SharedState,
};

/// Table and seat endpoints; mutation is staff-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/tables", post(open_table))
        .route("/tables/{table_number}", delete(close_table))
        .route(
            "/tables/{table_number}/seats/{seat_number}",
            post(seat_player).delete(vacate_seat),
        )
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/{table_number}", get(get_table))
        .merge(staff)
}

/// All non-closed tables with seat occupancy.
#[utoipa::path(
    get,
    path = "/api/tables",
    tag = "tables",
    responses((status = 200, description = "Open tables", body = [TableSummary]))
)]
pub async fn list_tables(
    State(state): State<SharedState>,
) -> Result<Json<Vec<TableSummary>>, AppError> {
    Ok(Json(table_service::list(&state).await?))
}

/// One table with its seats.
#[utoipa::path(
    get,
    path = "/api/tables/{table_number}",
    tag = "tables",
    params(("table_number" = u32, Path, description = "Table number")),
    responses(
        (status = 200, description = "Table", body = TableSummary),
        (status = 404, description = "Unknown table")
    )
)]
pub async fn get_table(
    State(state): State<SharedState>,
    Path(table_number): Path<u32>,
) -> Result<Json<TableSummary>, AppError> {
    Ok(Json(table_service::get(&state, table_number).await?))
}

/// Open a table for a catalog game.
#[utoipa::path(
    post,
    path = "/api/tables",
    tag = "tables",
    params(("Authorization" = String, Header, description = "Staff bearer token")),
    request_body = OpenTableRequest,
    responses(
        (status = 200, description = "Table opened", body = TableSummary),
        (status = 409, description = "Table already open")
    )
)]
pub async fn open_table(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<OpenTableRequest>,
) -> Result<Json<TableSummary>, AppError> {
    Ok(Json(table_service::open(&state, &claims, payload).await?))
}

/// Close a table, deleting its seats.
#[utoipa::path(
    delete,
    path = "/api/tables/{table_number}",
    tag = "tables",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("table_number" = u32, Path, description = "Table number")),
    responses((status = 200, description = "Table closed", body = MessageResponse))
)]
pub async fn close_table(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(table_number): Path<u32>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(
        table_service::close(&state, &claims, table_number).await?,
    ))
}

/// Seat a player at a specific seat.
#[utoipa::path(
    post,
    path = "/api/tables/{table_number}/seats/{seat_number}",
    tag = "tables",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("table_number" = u32, Path, description = "Table number"),
    ("seat_number" = u32, Path, description = "Seat number")),
    request_body = SeatPlayerRequest,
    responses(
        (status = 200, description = "Seat filled", body = SeatSummary),
        (status = 404, description = "Unknown table"),
        (status = 409, description = "Seat already occupied")
    )
)]
pub async fn seat_player(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path((table_number, seat_number)): Path<(u32, u32)>,
    Json(payload): Json<SeatPlayerRequest>,
) -> Result<Json<SeatSummary>, AppError> {
    Ok(Json(
        table_service::seat_player(&state, &claims, table_number, seat_number, payload).await?,
    ))
}

/// Vacate a seat.
#[utoipa::path(
    delete,
    path = "/api/tables/{table_number}/seats/{seat_number}",
    tag = "tables",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("table_number" = u32, Path, description = "Table number"),
    ("seat_number" = u32, Path, description = "Seat number")),
    responses((status = 200, description = "Seat vacated", body = MessageResponse))
)]
pub async fn vacate_seat(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path((table_number, seat_number)): Path<(u32, u32)>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(
        table_service::vacate_seat(&state, &claims, table_number, seat_number).await?,
    ))
}
