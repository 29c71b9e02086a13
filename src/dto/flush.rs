use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{FlushJackpotEntity, FlushProgressEntity, FlushSession, Suit},
    dto::format_optional_time,
};

/// One collector on the session leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct FlushLeader {
    pub id: Uuid,
    pub name: String,
    pub card_number: Option<String>,
    /// Suit letters collected so far, e.g. `["S", "H"]`.
    pub suits: Vec<&'static str>,
    pub count: usize,
    /// Display fraction, e.g. `2/4`.
    pub score: String,
}

impl From<FlushProgressEntity> for FlushLeader {
    fn from(progress: FlushProgressEntity) -> Self {
        let suits: Vec<&'static str> = progress.suits().iter().map(|suit| suit.letter()).collect();
        let count = suits.len();
        Self {
            id: progress.player_id,
            name: progress.player_name,
            card_number: progress.card_number,
            suits,
            count,
            score: format!("{count}/4"),
        }
    }
}

/// Session leaderboard body.
#[derive(Debug, Serialize, ToSchema)]
pub struct FlushLeaderboardResponse {
    pub session: Option<FlushSession>,
    pub leaders: Vec<FlushLeader>,
}

/// Jackpot projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct JackpotSummary {
    pub session: FlushSession,
    pub name: String,
    pub hours: String,
    pub amount: i64,
    pub base_amount: i64,
    pub daily_increment: i64,
    pub last_won_date: Option<String>,
    pub last_winner: Option<Uuid>,
}

impl From<FlushJackpotEntity> for JackpotSummary {
    fn from(jackpot: FlushJackpotEntity) -> Self {
        Self {
            session: jackpot.session,
            name: jackpot.name,
            hours: jackpot.hours,
            amount: jackpot.amount,
            base_amount: jackpot.base_amount,
            daily_increment: jackpot.daily_increment,
            last_won_date: format_optional_time(jackpot.last_won_date),
            last_winner: jackpot.last_winner,
        }
    }
}

/// Jackpot listing body.
#[derive(Debug, Serialize, ToSchema)]
pub struct JackpotsResponse {
    pub jackpots: Vec<JackpotSummary>,
    pub active_session: Option<FlushSession>,
}

/// Staff payload awarding one suit.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AwardSuitRequest {
    pub suit: Suit,
}

/// Body returned after a suit award.
#[derive(Debug, Serialize, ToSchema)]
pub struct AwardSuitResponse {
    pub message: String,
    pub suits: Vec<&'static str>,
    pub count: usize,
}
