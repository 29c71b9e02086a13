use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::PlayerEntity;

/// Guest projection for search results and lookups.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub card_number: String,
    pub name: String,
    pub phone: String,
    pub points: i64,
    pub rank: Option<u32>,
}

impl From<PlayerEntity> for PlayerSummary {
    fn from(player: PlayerEntity) -> Self {
        Self {
            id: player.id,
            card_number: player.card_number.clone(),
            name: player.display_name(),
            phone: player.phone.clone(),
            points: player.points,
            rank: player.rank,
        }
    }
}

/// Query string for the player search endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlayerSearchQuery {
    pub search: Option<String>,
}

/// Body returned when a floor session is opened.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckinResponse {
    pub message: String,
    pub checkin_id: Uuid,
}

/// Body returned when a floor session is closed out.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub message: String,
    pub hours_played: f64,
    pub points_earned: i64,
}
