//! Cash-game catalog maintenance.

use uuid::Uuid;

use crate::{
    dao::models::CashGameEntity,
    dto::{
        common::MessageResponse,
        game::{CashGameSummary, CreateGameRequest, UpdateGameRequest},
    },
    error::ServiceError,
    services::validate,
    state::SharedState,
};

/// Active catalog entries.
pub async fn list(state: &SharedState) -> Result<Vec<CashGameSummary>, ServiceError> {
    let store = state.require_store().await?;
    let games = store.list_active_games().await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Add a catalog entry.
pub async fn create(
    state: &SharedState,
    payload: CreateGameRequest,
) -> Result<CashGameSummary, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    if store
        .find_game_by_code(payload.game_code.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "game code `{}` already exists",
            payload.game_code
        )));
    }

    let game = CashGameEntity {
        id: Uuid::new_v4(),
        game_code: payload.game_code,
        name: payload.name,
        stakes: payload.stakes,
        min_buyin: payload.min_buyin,
        max_buyin: payload.max_buyin,
        is_active: true,
    };
    store.insert_game(game.clone()).await?;

    Ok(game.into())
}

/// Amend a catalog entry; omitted fields are unchanged.
pub async fn update(
    state: &SharedState,
    id: Uuid,
    payload: UpdateGameRequest,
) -> Result<CashGameSummary, ServiceError> {
    let store = state.require_store().await?;
    let mut game = store
        .find_game(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("game not found".into()))?;

    if let Some(name) = payload.name {
        game.name = name;
    }
    if let Some(stakes) = payload.stakes {
        game.stakes = stakes;
    }
    if let Some(min_buyin) = payload.min_buyin {
        game.min_buyin = min_buyin;
    }
    if let Some(max_buyin) = payload.max_buyin {
        game.max_buyin = max_buyin;
    }
    if let Some(is_active) = payload.is_active {
        game.is_active = is_active;
    }

    store.save_game(game.clone()).await?;
    Ok(game.into())
}

/// Soft-deactivate a catalog entry.
pub async fn deactivate(state: &SharedState, id: Uuid) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut game = store
        .find_game(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("game not found".into()))?;

    game.is_active = false;
    store.save_game(game).await?;

    Ok(MessageResponse::new("Game deactivated"))
}
