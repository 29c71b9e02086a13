//! The four-suit flush promotion: suit awards, winner detection, jackpots.

use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{ActivityAction, ActivityEntity, FlushProgressEntity, Suit},
    dto::{
        common::MessageResponse,
        flush::{
            AwardSuitRequest, AwardSuitResponse, FlushLeader, FlushLeaderboardResponse,
            JackpotsResponse,
        },
    },
    error::ServiceError,
    services::rules,
    state::SharedState,
};

fn suit_symbol(suit: Suit) -> &'static str {
    match suit {
        Suit::Spade => "♠",
        Suit::Heart => "♥",
        Suit::Diamond => "♦",
        Suit::Club => "♣",
    }
}

/// Today's collectors for the session in progress, most suits first.
pub async fn leaderboard(state: &SharedState) -> Result<FlushLeaderboardResponse, ServiceError> {
    let store = state.require_store().await?;
    let offset = state.config().venue_utc_offset_hours;
    let session = rules::current_session(offset);

    let leaders = match session {
        Some(session) => {
            let session_date = rules::session_date(rules::venue_now(offset));
            let mut leaders: Vec<FlushLeader> = store
                .list_flush_progress(session, session_date)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
            leaders.sort_by(|a, b| b.count.cmp(&a.count));
            leaders
        }
        None => Vec::new(),
    };

    Ok(FlushLeaderboardResponse { session, leaders })
}

/// Both jackpots plus the session in progress.
pub async fn jackpots(state: &SharedState) -> Result<JackpotsResponse, ServiceError> {
    let store = state.require_store().await?;
    let jackpots = store.list_flush_jackpots().await?;

    Ok(JackpotsResponse {
        jackpots: jackpots.into_iter().map(Into::into).collect(),
        active_session: rules::current_session(state.config().venue_utc_offset_hours),
    })
}

/// Award one suit to a player, completing the flush when all four land.
pub async fn award_suit(
    state: &SharedState,
    staff: &Claims,
    player_id: Uuid,
    payload: AwardSuitRequest,
) -> Result<AwardSuitResponse, ServiceError> {
    let store = state.require_store().await?;
    let offset = state.config().venue_utc_offset_hours;

    let Some(session) = rules::current_session(offset) else {
        return Err(ServiceError::InvalidInput("no active flush session".into()));
    };
    let session_date = rules::session_date(rules::venue_now(offset));

    let player = store
        .find_player(player_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;

    let now = SystemTime::now();
    let mut progress = match store
        .find_flush_progress(player.id, session, session_date.clone())
        .await?
    {
        Some(progress) => progress,
        None => FlushProgressEntity {
            id: Uuid::new_v4(),
            player_id: player.id,
            player_name: player.display_name(),
            card_number: Some(player.card_number.clone()),
            session,
            session_date,
            spade: false,
            heart: false,
            diamond: false,
            club: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        },
    };

    progress.set_suit(payload.suit);
    progress.updated_at = now;

    // The fourth suit wins the jackpot, exactly once per progress document.
    if progress.is_complete() && progress.completed_at.is_none() {
        progress.completed_at = Some(now);

        if let Some(mut jackpot) = store.find_flush_jackpot(session).await? {
            info!(
                player = %progress.player_name,
                amount = jackpot.amount,
                "flush jackpot won"
            );

            let mut log = ActivityEntity::new(ActivityAction::FlushWinner);
            log.player_id = Some(player.id);
            log.player_name = Some(progress.player_name.clone());
            log.staff_id = Some(staff.sub);
            log.staff_name = staff.name.clone();
            log.details = Some(format!("WON THE FLUSH JACKPOT! ${}", jackpot.amount));
            store.append_activity(log).await?;

            jackpot.amount = jackpot.base_amount;
            jackpot.last_won_date = Some(now);
            jackpot.last_winner = Some(player.id);
            store.save_flush_jackpot(jackpot).await?;
        }
    }

    store.save_flush_progress(progress.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::for_suit(payload.suit));
    log.player_id = Some(player.id);
    log.player_name = Some(progress.player_name.clone());
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some(format!("Awarded {} flush", suit_symbol(payload.suit)));
    store.append_activity(log).await?;

    let suits: Vec<&'static str> = progress.suits().iter().map(|suit| suit.letter()).collect();
    let count = suits.len();

    Ok(AwardSuitResponse {
        message: "Suit awarded".into(),
        suits,
        count,
    })
}

/// Wipe all flush progress, every session, every date.
pub async fn reset(state: &SharedState, staff: &Claims) -> Result<MessageResponse, ServiceError> {
    let store = state.require_store().await?;
    let removed = store.delete_all_flush_progress().await?;
    info!(removed, "flush progress reset");

    let mut log = ActivityEntity::new(ActivityAction::FlushReset);
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some("All flush progress reset".into());
    store.append_activity(log).await?;

    Ok(MessageResponse::new("All flush progress reset"))
}
