//! Read-only aggregates for the lobby and wall displays.

use indexmap::IndexMap;

use crate::{
    dao::models::TableStatus,
    dto::public::{
        DisplayFlushLeader, DisplayFlushResponse, DisplayGameStatus, LiveStatusResponse,
    },
    error::ServiceError,
    services::rules,
    state::SharedState,
};

/// Names shown per game on the waitlist board.
const BOARD_NAMES: usize = 10;
/// Collectors shown on the flush board.
const BOARD_LEADERS: usize = 12;
/// Naive minutes-per-party wait estimate.
const WAIT_MINUTES_PER_PARTY: u64 = 4;

/// Floor occupancy snapshot.
pub async fn live_status(state: &SharedState) -> Result<LiveStatusResponse, ServiceError> {
    let store = state.require_store().await?;
    let tables: Vec<_> = store
        .list_open_tables()
        .await?
        .into_iter()
        .filter(|table| table.status == TableStatus::Open)
        .collect();

    let mut total_seats: i64 = 0;
    let mut occupied: i64 = 0;
    for table in &tables {
        total_seats += i64::from(table.max_seats);
        occupied += store.count_seats_for_table(table.table_number).await? as i64;
    }

    let waitlist_count = store.count_active_waitlist().await?;

    Ok(LiveStatusResponse {
        tables_open: tables.len(),
        seats_available: total_seats - occupied,
        players_seated: occupied,
        waitlist_count,
        avg_wait_minutes: waitlist_count * WAIT_MINUTES_PER_PARTY,
    })
}

/// Per-game seat and queue overview for the waitlist board.
pub async fn display_waitlist(
    state: &SharedState,
) -> Result<Vec<DisplayGameStatus>, ServiceError> {
    let store = state.require_store().await?;
    let games = store.list_active_games().await?;
    let tables: Vec<_> = store
        .list_open_tables()
        .await?
        .into_iter()
        .filter(|table| table.status == TableStatus::Open)
        .collect();

    let mut board = Vec::with_capacity(games.len());
    for game in games {
        let game_tables: Vec<_> = tables
            .iter()
            .filter(|table| table.game_id == Some(game.id) || table.game_name == game.name)
            .collect();

        let mut seats_open: i64 = 0;
        for table in &game_tables {
            let occupied = store.count_seats_for_table(table.table_number).await? as i64;
            seats_open += i64::from(table.max_seats) - occupied;
        }

        let mut waiting = store
            .list_active_waitlist_for_game(game.game_code.clone())
            .await?;
        waiting.truncate(BOARD_NAMES);
        let names: Vec<String> = waiting.into_iter().map(|entry| entry.player_name).collect();

        board.push(DisplayGameStatus {
            tables: game_tables.len(),
            seats_open,
            waitlist_count: names.len(),
            waitlist: names,
            game: game.into(),
        });
    }

    Ok(board)
}

/// Jackpots and the top collectors for the flush board.
pub async fn display_flush(state: &SharedState) -> Result<DisplayFlushResponse, ServiceError> {
    let store = state.require_store().await?;

    let mut jackpots = IndexMap::new();
    for jackpot in store.list_flush_jackpots().await? {
        jackpots.insert(jackpot.session.as_str(), jackpot.amount);
    }

    let mut leaders: Vec<DisplayFlushLeader> = store
        .list_all_flush_progress()
        .await?
        .into_iter()
        .filter(|progress| !progress.suits().is_empty())
        .map(|progress| {
            let suits: Vec<&'static str> =
                progress.suits().iter().map(|suit| suit.letter()).collect();
            DisplayFlushLeader {
                name: progress.player_name,
                score: format!("{}/4", suits.len()),
                suits,
            }
        })
        .collect();
    leaders.sort_by(|a, b| b.suits.len().cmp(&a.suits.len()));
    leaders.truncate(BOARD_LEADERS);

    Ok(DisplayFlushResponse {
        jackpots,
        active_session: rules::current_session(state.config().venue_utc_offset_hours),
        leaders,
    })
}
