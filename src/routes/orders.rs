use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, put},
};
use uuid::Uuid;

use crate::{
    auth::{Claims, require_staff},
    dto::{
        common::MessageResponse,
        order::{CreateOrderRequest, CreateOrderResponse, OrderListQuery, OrderSummary},
    },
    error::AppError,
    services::order_service,
    state::SharedState,
};

/// Food order endpoints; the kitchen workflow is staff-only.
pub fn router(state: SharedState) -> Router<SharedState> {
    let staff = Router::new()
        .route("/orders/{id}/start", put(start_order))
        .route("/orders/{id}/complete", put(complete_order))
        .route("/orders/{id}", delete(cancel_order))
        .route_layer(middleware::from_fn_with_state(state, require_staff));

    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .merge(staff)
}

/// Kitchen queue, defaulting to in-flight orders.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    params(("status" = Option<String>, Query, description = "Restrict to one status")),
    responses((status = 200, description = "Orders oldest first", body = [OrderSummary]))
)]
pub async fn list_orders(
    State(state): State<SharedState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    Ok(Json(order_service::list(&state, query.status).await?))
}

/// Place an order from a table.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses((status = 200, description = "Order placed", body = CreateOrderResponse))
)]
pub async fn create_order(
    State(state): State<SharedState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    Ok(Json(order_service::create(&state, payload).await?))
}

/// Start preparing an order.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/start",
    tag = "orders",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order started", body = MessageResponse),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn start_order(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(order_service::start(&state, &claims, id).await?))
}

/// Mark an order delivered.
#[utoipa::path(
    put,
    path = "/api/orders/{id}/complete",
    tag = "orders",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order delivered", body = MessageResponse),
        (status = 404, description = "Unknown order")
    )
)]
pub async fn complete_order(
    State(state): State<SharedState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(order_service::complete(&state, &claims, id).await?))
}

/// Cancel an order.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "orders",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("id" = Uuid, Path, description = "Order identifier")),
    responses((status = 200, description = "Order cancelled", body = MessageResponse))
)]
pub async fn cancel_order(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    Ok(Json(order_service::cancel(&state, id).await?))
}
