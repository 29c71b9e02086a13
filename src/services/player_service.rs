//! Guest lookups and the floor checkin/checkout flow.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{
        ActivityAction, ActivityEntity, CheckinEntity, PointsKind, PointsTransactionEntity,
    },
    dto::player::{CheckinResponse, CheckoutResponse, PlayerSummary},
    error::ServiceError,
    services::rules,
    state::SharedState,
};

/// Search cap, matching the venue UI page size.
const SEARCH_LIMIT: i64 = 100;

/// List guests, optionally filtered by name prefix or card substring.
pub async fn list(
    state: &SharedState,
    search: Option<String>,
) -> Result<Vec<PlayerSummary>, ServiceError> {
    let store = state.require_store().await?;
    let players = store.search_players(search, SEARCH_LIMIT).await?;
    Ok(players.into_iter().map(Into::into).collect())
}

/// Look up one guest by id.
pub async fn get(state: &SharedState, id: Uuid) -> Result<PlayerSummary, ServiceError> {
    let store = state.require_store().await?;
    let player = store
        .find_player(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;
    Ok(player.into())
}

/// Look up one guest by loyalty card number.
pub async fn get_by_card(
    state: &SharedState,
    card_number: String,
) -> Result<PlayerSummary, ServiceError> {
    let store = state.require_store().await?;
    let player = store
        .find_player_by_card(card_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;
    Ok(player.into())
}

/// Open a floor session for a guest.
pub async fn checkin(
    state: &SharedState,
    staff: &Claims,
    player_id: Uuid,
) -> Result<CheckinResponse, ServiceError> {
    let store = state.require_store().await?;
    let player = store
        .find_player(player_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;

    let checkin = CheckinEntity {
        id: Uuid::new_v4(),
        player_id: player.id,
        player_name: player.display_name(),
        checked_in_at: SystemTime::now(),
        checked_out_at: None,
        total_minutes: None,
        hours_played: None,
        points_awarded: None,
        checked_in_by: Some(staff.sub),
        checked_out_by: None,
    };
    let checkin_id = checkin.id;
    store.insert_checkin(checkin).await?;

    let mut entry = ActivityEntity::new(ActivityAction::CheckIn);
    entry.player_id = Some(player.id);
    entry.player_name = Some(player.display_name());
    entry.staff_id = Some(staff.sub);
    entry.staff_name = staff.name.clone();
    entry.details = Some("Player checked in".into());
    store.append_activity(entry).await?;

    Ok(CheckinResponse {
        message: "Checked in successfully".into(),
        checkin_id,
    })
}

/// Close the guest's open floor session, awarding time-based points.
pub async fn checkout(
    state: &SharedState,
    staff: &Claims,
    player_id: Uuid,
) -> Result<CheckoutResponse, ServiceError> {
    let store = state.require_store().await?;

    let Some(mut checkin) = store.find_open_checkin(player_id).await? else {
        return Err(ServiceError::InvalidInput("no active check-in found".into()));
    };

    let now = SystemTime::now();
    let hours = now
        .duration_since(checkin.checked_in_at)
        .map(|elapsed| elapsed.as_secs_f64() / 3600.0)
        .unwrap_or(0.0);
    let points = rules::cash_points(hours);
    let hours_played = (hours * 100.0).round() / 100.0;

    checkin.checked_out_at = Some(now);
    checkin.hours_played = Some(hours_played);
    checkin.total_minutes = Some((hours * 60.0).round() as u32);
    checkin.points_awarded = Some(points);
    checkin.checked_out_by = Some(staff.sub);
    store.save_checkin(checkin).await?;

    if points > 0 {
        store.add_player_points(player_id, points).await?;

        let kind = if hours >= 6.0 {
            PointsKind::CashDaily
        } else {
            PointsKind::CashHourly
        };
        let transaction = PointsTransactionEntity {
            id: Uuid::new_v4(),
            player_id,
            player_name: None,
            points,
            kind,
            description: Some(format!("{:.1} hours played", hours)),
            awarded_by: Some(staff.sub),
            created_at: now,
        };
        store.insert_points_transaction(transaction).await?;
    }

    let player = store.find_player(player_id).await?;

    let mut entry = ActivityEntity::new(ActivityAction::CheckOut);
    entry.player_id = Some(player_id);
    entry.player_name = player.map(|p| p.display_name());
    entry.staff_id = Some(staff.sub);
    entry.staff_name = staff.name.clone();
    entry.details = Some(format!(
        "Checked out after {:.1} hours, earned {points} points",
        hours
    ));
    store.append_activity(entry).await?;

    Ok(CheckoutResponse {
        message: "Checked out successfully".into(),
        hours_played,
        points_earned: points,
    })
}
