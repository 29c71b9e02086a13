use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{dao::models::FlushSession, dto::game::CashGameSummary};

/// Floor occupancy snapshot for the lobby screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct LiveStatusResponse {
    pub tables_open: usize,
    pub seats_available: i64,
    pub players_seated: i64,
    pub waitlist_count: u64,
    /// Naive estimate: four minutes per waiting party.
    pub avg_wait_minutes: u64,
}

/// Per-game block on the waitlist display board.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisplayGameStatus {
    pub game: CashGameSummary,
    pub tables: usize,
    pub seats_open: i64,
    /// First waiting names, board-sized.
    pub waitlist: Vec<String>,
    pub waitlist_count: usize,
}

/// One collector on the flush display board.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisplayFlushLeader {
    pub name: String,
    pub suits: Vec<&'static str>,
    pub score: String,
}

/// Flush display board payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct DisplayFlushResponse {
    /// Jackpot amount keyed by session identifier.
    #[schema(value_type = Object)]
    pub jackpots: IndexMap<&'static str, i64>,
    pub active_session: Option<FlushSession>,
    pub leaders: Vec<DisplayFlushLeader>,
}
