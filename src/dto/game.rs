use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::CashGameEntity;

/// Catalog entry projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct CashGameSummary {
    pub id: Uuid,
    pub game_code: String,
    pub name: String,
    pub stakes: String,
    pub min_buyin: u32,
    pub max_buyin: u32,
    pub is_active: bool,
}

impl From<CashGameEntity> for CashGameSummary {
    fn from(game: CashGameEntity) -> Self {
        Self {
            id: game.id,
            game_code: game.game_code,
            name: game.name,
            stakes: game.stakes,
            min_buyin: game.min_buyin,
            max_buyin: game.max_buyin,
            is_active: game.is_active,
        }
    }
}

/// Admin payload to add a catalog entry.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGameRequest {
    #[validate(length(min = 1, max = 32))]
    pub game_code: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub stakes: String,
    pub min_buyin: u32,
    pub max_buyin: u32,
}

/// Admin payload to amend a catalog entry; omitted fields are unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    pub name: Option<String>,
    pub stakes: Option<String>,
    pub min_buyin: Option<u32>,
    pub max_buyin: Option<u32>,
    pub is_active: Option<bool>,
}
