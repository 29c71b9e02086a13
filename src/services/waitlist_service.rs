//! The per-game waitlist: join, call, seat, remove.

use std::time::{Duration, SystemTime};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{ActivityAction, ActivityEntity, WaitlistEntryEntity, WaitlistStatus},
    dto::{
        common::MessageResponse,
        format_system_time,
        waitlist::{
            CallPlayerResponse, JoinWaitlistRequest, JoinWaitlistResponse, SeatFromWaitlistRequest,
            SeatedFromWaitlistResponse, WaitlistEntrySummary, WaitlistOverviewResponse,
        },
    },
    error::ServiceError,
    services::{notifier, validate},
    state::SharedState,
};

/// How long a called player holds their spot before housekeeping removes it.
pub const CALL_EXPIRY: Duration = Duration::from_secs(30 * 60);

const DEFAULT_PLANNED_BUYIN: u32 = 300;

/// Every active queue, grouped by game code in position order.
pub async fn overview(state: &SharedState) -> Result<WaitlistOverviewResponse, ServiceError> {
    let store = state.require_store().await?;
    let entries = store.list_active_waitlist().await?;
    let total_count = entries.len();

    let mut waitlists: IndexMap<String, Vec<WaitlistEntrySummary>> = IndexMap::new();
    for entry in entries {
        waitlists
            .entry(entry.game_code.clone())
            .or_default()
            .push(entry.into());
    }

    Ok(WaitlistOverviewResponse {
        waitlists,
        total_count,
    })
}

/// The active queue for one game.
pub async fn for_game(
    state: &SharedState,
    game_code: String,
) -> Result<Vec<WaitlistEntrySummary>, ServiceError> {
    let store = state.require_store().await?;
    let entries = store.list_active_waitlist_for_game(game_code).await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

/// Active entries held by one loyalty card.
pub async fn for_card(
    state: &SharedState,
    card_number: String,
) -> Result<Vec<WaitlistEntrySummary>, ServiceError> {
    let store = state.require_store().await?;
    let entries = store.list_active_waitlist_for_card(card_number).await?;
    Ok(entries.into_iter().map(Into::into).collect())
}

/// Join a game's queue at the next position.
pub async fn join(
    state: &SharedState,
    payload: JoinWaitlistRequest,
) -> Result<JoinWaitlistResponse, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    if store
        .find_game_by_code(payload.game_code.clone())
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound(format!(
            "unknown game `{}`",
            payload.game_code
        )));
    }

    let position = store
        .last_waitlist_position(payload.game_code.clone())
        .await?
        .map_or(1, |last| last + 1);

    let entry = WaitlistEntryEntity {
        id: Uuid::new_v4(),
        player_id: None,
        player_name: payload.player_name,
        phone: payload.phone,
        card_number: payload.card_number,
        game_code: payload.game_code,
        position,
        num_players: payload.num_players.unwrap_or(1),
        planned_buyin: payload.planned_buyin.unwrap_or(DEFAULT_PLANNED_BUYIN),
        status: WaitlistStatus::Waiting,
        joined_at: SystemTime::now(),
        called_at: None,
        called_by: None,
        expires_at: None,
        seated_at: None,
        removed_at: None,
    };
    store.insert_waitlist_entry(entry.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::WaitlistJoin);
    log.player_name = Some(entry.player_name.clone());
    log.details = Some(format!("Joined waitlist for {}", entry.game_code));
    store.append_activity(log).await?;

    Ok(JoinWaitlistResponse {
        message: "Added to waitlist".into(),
        entry: entry.into(),
    })
}

/// Call a player to a seat, stamping an expiry and firing a best-effort
/// email.
pub async fn call(
    state: &SharedState,
    staff: &Claims,
    id: Uuid,
) -> Result<CallPlayerResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut entry = store
        .find_waitlist_entry(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("waitlist entry not found".into()))?;

    let now = SystemTime::now();
    let expires_at = now + CALL_EXPIRY;
    entry.status = WaitlistStatus::Called;
    entry.called_at = Some(now);
    entry.called_by = Some(staff.sub);
    entry.expires_at = Some(expires_at);
    store.save_waitlist_entry(entry.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::Called);
    log.player_name = Some(entry.player_name.clone());
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some("Player called from waitlist".into());
    store.append_activity(log).await?;

    // Failure here never rolls back the call.
    notifier::spawn_seat_ready_email(state, store.clone(), &entry);

    Ok(CallPlayerResponse {
        message: "Player called".into(),
        expires_at: format_system_time(expires_at),
    })
}

/// Mark a waitlisted player seated, then compact the remaining positions.
pub async fn seat(
    state: &SharedState,
    staff: &Claims,
    id: Uuid,
    payload: SeatFromWaitlistRequest,
) -> Result<SeatedFromWaitlistResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut entry = store
        .find_waitlist_entry(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("waitlist entry not found".into()))?;

    entry.status = WaitlistStatus::Seated;
    entry.seated_at = Some(SystemTime::now());
    store.save_waitlist_entry(entry.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::Seated);
    log.player_name = Some(entry.player_name.clone());
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.table_number = Some(payload.table_number);
    log.details = Some(format!(
        "Seated at Table {}, Seat {}",
        payload.table_number, payload.seat_number
    ));
    store.append_activity(log).await?;

    // Close the gap the seated party leaves behind.
    let remaining = store
        .list_waiting_after(entry.game_code.clone(), entry.position)
        .await?;
    for (offset, mut waiting) in remaining.into_iter().enumerate() {
        waiting.position = entry.position + offset as u32;
        store.save_waitlist_entry(waiting).await?;
    }

    Ok(SeatedFromWaitlistResponse {
        message: "Player seated".into(),
        table: payload.table_number,
        seat: payload.seat_number,
    })
}

/// Soft-remove an entry from its queue.
pub async fn remove(
    state: &SharedState,
    staff: &Claims,
    id: Uuid,
) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let mut entry = store
        .find_waitlist_entry(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("waitlist entry not found".into()))?;

    entry.status = WaitlistStatus::Removed;
    entry.removed_at = Some(SystemTime::now());
    store.save_waitlist_entry(entry.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::Removed);
    log.player_name = Some(entry.player_name);
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some("Removed from waitlist".into());
    store.append_activity(log).await?;

    Ok(MessageResponse::new("Removed from waitlist"))
}
