use axum::{
    Extension, Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};

use crate::{
    auth::{Claims, require_auth},
    dto::auth::{
        PlayerAuthResponse, PlayerLoginRequest, PlayerRegisterRequest, StaffAuthResponse,
        StaffLoginRequest,
    },
    error::AppError,
    services::auth_service,
    state::SharedState,
};

/// Login and registration endpoints.
pub fn router(state: SharedState) -> Router<SharedState> {
    let protected = Router::new()
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/auth/player/login", post(player_login))
        .route("/auth/player/register", post(player_register))
        .route("/auth/staff/login", post(staff_login))
        .merge(protected)
}

/// Authenticate a player by card number plus PIN or phone-last-4.
#[utoipa::path(
    post,
    path = "/api/auth/player/login",
    tag = "auth",
    request_body = PlayerLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = PlayerAuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many failed attempts")
    )
)]
pub async fn player_login(
    State(state): State<SharedState>,
    Json(payload): Json<PlayerLoginRequest>,
) -> Result<Json<PlayerAuthResponse>, AppError> {
    Ok(Json(auth_service::login_player(&state, payload).await?))
}

/// Create a player account and issue a token.
#[utoipa::path(
    post,
    path = "/api/auth/player/register",
    tag = "auth",
    request_body = PlayerRegisterRequest,
    responses(
        (status = 200, description = "Account created", body = PlayerAuthResponse),
        (status = 409, description = "Phone already registered")
    )
)]
pub async fn player_register(
    State(state): State<SharedState>,
    Json(payload): Json<PlayerRegisterRequest>,
) -> Result<Json<PlayerAuthResponse>, AppError> {
    Ok(Json(auth_service::register_player(&state, payload).await?))
}

/// Authenticate a staff member.
#[utoipa::path(
    post,
    path = "/api/auth/staff/login",
    tag = "auth",
    request_body = StaffLoginRequest,
    responses(
        (status = 200, description = "Token issued", body = StaffAuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many failed attempts")
    )
)]
pub async fn staff_login(
    State(state): State<SharedState>,
    Json(payload): Json<StaffLoginRequest>,
) -> Result<Json<StaffAuthResponse>, AppError> {
    Ok(Json(auth_service::login_staff(&state, payload).await?))
}

/// Echo the verified claims of the presented token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    params(("Authorization" = String, Header, description = "Bearer token")),
    responses((status = 200, description = "Current token claims", body = Claims))
)]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
