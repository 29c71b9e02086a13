use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
};

use crate::{
    auth::require_staff,
    dto::activity::{ActivityQuery, ActivitySummary},
    error::AppError,
    services::activity_service,
    state::SharedState,
};

/// Audit trail endpoints, staff-only throughout.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/activity", get(list_activity))
        .route("/activity/export/csv", get(export_csv))
        .route_layer(middleware::from_fn_with_state(state, require_staff))
}

/// Newest audit entries, filtered.
#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "activity",
    params(("Authorization" = String, Header, description = "Staff bearer token"),
    ("limit" = Option<i64>, Query, description = "Rows to return, default 50"),
    ("action_type" = Option<String>, Query, description = "Restrict to one action kind"),
    ("staff" = Option<String>, Query, description = "Restrict to one staff name")),
    responses((status = 200, description = "Audit entries newest first", body = [ActivitySummary]))
)]
pub async fn list_activity(
    State(state): State<SharedState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivitySummary>>, AppError> {
    Ok(Json(activity_service::query(&state, query).await?))
}

/// Newest audit entries as a CSV attachment.
#[utoipa::path(
    get,
    path = "/api/activity/export/csv",
    tag = "activity",
    params(("Authorization" = String, Header, description = "Staff bearer token")),
    responses((status = 200, description = "CSV export", body = String, content_type = "text/csv"))
)]
pub async fn export_csv(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, AppError> {
    let csv = activity_service::export_csv(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=activity_log.csv",
            ),
        ],
        csv,
    ))
}
