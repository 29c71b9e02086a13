use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{WaitlistEntryEntity, WaitlistStatus},
    dto::{format_optional_time, format_system_time, validation::validate_phone},
};

/// Payload to join a game's waitlist. No authentication needed; walk-ups
/// phone in before they have an account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinWaitlistRequest {
    #[validate(length(min = 1, max = 60))]
    pub player_name: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    pub card_number: Option<String>,
    pub game_code: String,
    /// Party size; defaults to one.
    pub num_players: Option<u32>,
    /// Defaults to 300.
    pub planned_buyin: Option<u32>,
}

/// Queue entry projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct WaitlistEntrySummary {
    pub id: Uuid,
    pub player_name: String,
    pub phone: String,
    pub card_number: Option<String>,
    pub game_code: String,
    pub position: u32,
    pub num_players: u32,
    pub planned_buyin: u32,
    pub status: WaitlistStatus,
    pub joined_at: String,
    pub called_at: Option<String>,
    pub expires_at: Option<String>,
}

impl From<WaitlistEntryEntity> for WaitlistEntrySummary {
    fn from(entry: WaitlistEntryEntity) -> Self {
        Self {
            id: entry.id,
            player_name: entry.player_name,
            phone: entry.phone,
            card_number: entry.card_number,
            game_code: entry.game_code,
            position: entry.position,
            num_players: entry.num_players,
            planned_buyin: entry.planned_buyin,
            status: entry.status,
            joined_at: format_system_time(entry.joined_at),
            called_at: format_optional_time(entry.called_at),
            expires_at: format_optional_time(entry.expires_at),
        }
    }
}

/// All active queues grouped by game code, in catalog order.
#[derive(Debug, Serialize, ToSchema)]
pub struct WaitlistOverviewResponse {
    #[schema(value_type = Object)]
    pub waitlists: IndexMap<String, Vec<WaitlistEntrySummary>>,
    pub total_count: usize,
}

/// Body returned after joining a waitlist.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinWaitlistResponse {
    pub message: String,
    pub entry: WaitlistEntrySummary,
}

/// Body returned after calling a player.
#[derive(Debug, Serialize, ToSchema)]
pub struct CallPlayerResponse {
    pub message: String,
    pub expires_at: String,
}

/// Staff payload when seating a called player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeatFromWaitlistRequest {
    pub table_number: u32,
    pub seat_number: u32,
}

/// Body returned once a waitlisted player is seated.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeatedFromWaitlistResponse {
    pub message: String,
    pub table: u32,
    pub seat: u32,
}
