use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{SeatEntity, TableEntity, TableStatus},
    dto::format_system_time,
};

/// Staff payload to open a table.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenTableRequest {
    pub table_number: u32,
    pub game_code: String,
    /// Defaults to nine seats.
    pub capacity: Option<u32>,
}

/// Staff payload to seat a guest directly at a table.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeatPlayerRequest {
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
}

/// Occupied-seat projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeatSummary {
    pub id: Uuid,
    pub table_number: u32,
    pub seat_number: u32,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub seated_at: String,
}

impl From<SeatEntity> for SeatSummary {
    fn from(seat: SeatEntity) -> Self {
        Self {
            id: seat.id,
            table_number: seat.table_number,
            seat_number: seat.seat_number,
            player_id: seat.player_id,
            player_name: seat.player_name,
            card_number: seat.card_number,
            seated_at: format_system_time(seat.seated_at),
        }
    }
}

/// Table projection enriched with its current seats.
#[derive(Debug, Serialize, ToSchema)]
pub struct TableSummary {
    pub id: Uuid,
    pub table_number: u32,
    pub game_name: String,
    pub stakes: String,
    pub max_seats: u32,
    pub status: TableStatus,
    pub opened_at: Option<String>,
    pub seats: Vec<SeatSummary>,
    pub occupied_count: usize,
    pub available_seats: i64,
}

impl TableSummary {
    /// Combine a table with its seat records.
    pub fn from_parts(table: TableEntity, seats: Vec<SeatEntity>) -> Self {
        let seats: Vec<SeatSummary> = seats.into_iter().map(Into::into).collect();
        let occupied_count = seats.len();
        Self {
            id: table.id,
            table_number: table.table_number,
            game_name: table.game_name,
            stakes: table.stakes,
            max_seats: table.max_seats,
            status: table.status,
            opened_at: table.opened_at.map(format_system_time),
            available_seats: i64::from(table.max_seats) - occupied_count as i64,
            occupied_count,
            seats,
        }
    }
}
