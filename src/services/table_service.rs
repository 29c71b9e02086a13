//! Table lifecycle and direct seat assignment.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{ActivityAction, ActivityEntity, SeatEntity, TableEntity, TableStatus},
    dto::{
        common::MessageResponse,
        table::{OpenTableRequest, SeatPlayerRequest, SeatSummary, TableSummary},
    },
    error::ServiceError,
    state::SharedState,
};

/// Default seat count for a new table.
const DEFAULT_SEATS: u32 = 9;
/// Stakes label used when a table is opened for an unknown game.
const FALLBACK_STAKES: &str = "$1/$3";

/// All non-closed tables with their seat occupancy.
pub async fn list(state: &SharedState) -> Result<Vec<TableSummary>, ServiceError> {
    let store = state.require_store().await?;
    let tables = store.list_open_tables().await?;

    let mut summaries = Vec::with_capacity(tables.len());
    for table in tables {
        let seats = store.list_seats_for_table(table.table_number).await?;
        summaries.push(TableSummary::from_parts(table, seats));
    }
    Ok(summaries)
}

/// One table with its seats.
pub async fn get(state: &SharedState, table_number: u32) -> Result<TableSummary, ServiceError> {
    let store = state.require_store().await?;
    let table = store
        .find_table_by_number(table_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("table not found".into()))?;
    let seats = store.list_seats_for_table(table.table_number).await?;
    Ok(TableSummary::from_parts(table, seats))
}

/// Open a table for a catalog game.
pub async fn open(
    state: &SharedState,
    staff: &Claims,
    payload: OpenTableRequest,
) -> Result<TableSummary, ServiceError> {
    let store = state.require_store().await?;

    if store
        .find_open_table(payload.table_number)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict("table already open".into()));
    }

    let game = store.find_game_by_code(payload.game_code.clone()).await?;
    let (game_id, game_name, stakes) = match game {
        Some(game) => (Some(game.id), game.name, game.stakes),
        None => (None, "Unknown".to_owned(), FALLBACK_STAKES.to_owned()),
    };

    let table = TableEntity {
        id: Uuid::new_v4(),
        table_number: payload.table_number,
        game_id,
        game_name,
        stakes,
        max_seats: payload.capacity.unwrap_or(DEFAULT_SEATS),
        status: TableStatus::Open,
        opened_at: Some(SystemTime::now()),
        closed_at: None,
        opened_by: Some(staff.sub),
    };
    store.insert_table(table.clone()).await?;

    let mut entry = ActivityEntity::new(ActivityAction::TableOpen);
    entry.staff_id = Some(staff.sub);
    entry.staff_name = staff.name.clone();
    entry.table_number = Some(table.table_number);
    entry.details = Some(format!(
        "Table {} opened for {}",
        table.table_number, table.game_name
    ));
    store.append_activity(entry).await?;

    Ok(TableSummary::from_parts(table, Vec::new()))
}

/// Close a table and cascade-delete its seats.
pub async fn close(
    state: &SharedState,
    staff: &Claims,
    table_number: u32,
) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;

    store.close_table(table_number, SystemTime::now()).await?;
    store.delete_seats_for_table(table_number).await?;

    let mut entry = ActivityEntity::new(ActivityAction::TableClose);
    entry.staff_id = Some(staff.sub);
    entry.staff_name = staff.name.clone();
    entry.table_number = Some(table_number);
    entry.details = Some(format!("Table {table_number} closed"));
    store.append_activity(entry).await?;

    Ok(MessageResponse::new(format!("Table {table_number} closed")))
}

/// Seat a guest directly at a specific seat.
pub async fn seat_player(
    state: &SharedState,
    staff: &Claims,
    table_number: u32,
    seat_number: u32,
    payload: SeatPlayerRequest,
) -> Result<SeatSummary, ServiceError> {
    let store = state.require_store().await?;

    let table = store
        .find_table_by_number(table_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("table not found".into()))?;

    if store.find_seat(table_number, seat_number).await?.is_some() {
        return Err(ServiceError::Conflict("seat is occupied".into()));
    }

    let seat = SeatEntity {
        id: Uuid::new_v4(),
        table_id: table.id,
        table_number,
        seat_number,
        player_id: payload.player_id,
        player_name: payload.player_name,
        card_number: payload.card_number,
        seated_at: SystemTime::now(),
        seated_by: Some(staff.sub),
    };
    store.insert_seat(seat.clone()).await?;

    let mut entry = ActivityEntity::new(ActivityAction::Seated);
    entry.player_id = seat.player_id;
    entry.player_name = Some(seat.player_name.clone());
    entry.staff_id = Some(staff.sub);
    entry.staff_name = staff.name.clone();
    entry.table_number = Some(table_number);
    entry.details = Some(format!("Seated at Seat {seat_number}"));
    store.append_activity(entry).await?;

    Ok(seat.into())
}

/// Vacate a seat. Idempotent; logs only when a seat record existed.
pub async fn vacate_seat(
    state: &SharedState,
    staff: &Claims,
    table_number: u32,
    seat_number: u32,
) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;

    if let Some(seat) = store.find_seat(table_number, seat_number).await? {
        let mut entry = ActivityEntity::new(ActivityAction::Removed);
        entry.player_id = seat.player_id;
        entry.player_name = Some(seat.player_name);
        entry.staff_id = Some(staff.sub);
        entry.staff_name = staff.name.clone();
        entry.table_number = Some(table_number);
        entry.details = Some(format!("Removed from Seat {seat_number}"));
        store.append_activity(entry).await?;
    }

    store.delete_seat(table_number, seat_number).await?;

    Ok(MessageResponse::new("Player removed from seat"))
}
