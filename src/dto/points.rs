use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::PlayerEntity;

/// One row of the points leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub id: Uuid,
    pub card_number: String,
    pub name: String,
    pub points: i64,
}

impl LeaderboardEntry {
    /// Project a player at a given one-based rank.
    pub fn from_player(rank: u32, player: &PlayerEntity) -> Self {
        Self {
            rank,
            id: player.id,
            card_number: player.card_number.clone(),
            name: player.display_name(),
            points: player.points,
        }
    }
}

/// Leaderboard body, with the points needed to sit in the top thirty.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub top30_cutoff: i64,
}

/// Top-thirty cutoff body.
#[derive(Debug, Serialize, ToSchema)]
pub struct Top30Response {
    pub cutoff: i64,
    pub count: usize,
}

/// Staff payload to award bonus points.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AwardPointsRequest {
    pub player_id: Uuid,
    #[validate(range(min = 1, max = 10_000))]
    pub points: i64,
    #[validate(length(min = 1, max = 200))]
    pub reason: String,
}

/// Body returned after a points award.
#[derive(Debug, Serialize, ToSchema)]
pub struct AwardPointsResponse {
    pub message: String,
    pub new_total: i64,
}
