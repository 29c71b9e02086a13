use axum::Router;

use crate::state::SharedState;

pub mod activity;
pub mod auth;
pub mod docs;
pub mod flush;
pub mod games;
pub mod health;
pub mod orders;
pub mod players;
pub mod points;
pub mod public;
pub mod tables;
pub mod tournaments;
pub mod waitlist;

/// Compose all route trees under the `/api` prefix, plus documentation.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(auth::router(state.clone()))
        .merge(players::router(state.clone()))
        .merge(games::router(state.clone()))
        .merge(waitlist::router(state.clone()))
        .merge(tables::router(state.clone()))
        .merge(tournaments::router(state.clone()))
        .merge(flush::router(state.clone()))
        .merge(orders::router(state.clone()))
        .merge(points::router(state.clone()))
        .merge(activity::router(state.clone()))
        .merge(public::router());

    let docs_router = docs::router(state.clone());

    Router::new()
        .nest("/api", api_router)
        .merge(docs_router)
        .with_state(state)
}
