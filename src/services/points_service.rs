//! Point awards and the leaderboard. Ranks are recomputed by a full
//! sort-and-rewrite on every leaderboard read; there is no cache.

use crate::{
    auth::Claims,
    dao::models::{
        ActivityAction, ActivityEntity, PointsKind, PointsTransactionEntity,
    },
    dto::points::{
        AwardPointsRequest, AwardPointsResponse, LeaderboardEntry, LeaderboardResponse,
        Top30Response,
    },
    error::ServiceError,
    services::validate,
    state::SharedState,
};

/// Leaderboard page size.
const LEADERBOARD_LIMIT: i64 = 100;
/// Promotion cutoff rank.
const TOP_CUTOFF: usize = 30;

/// Full leaderboard; ranks are written back to the player documents.
pub async fn leaderboard(state: &SharedState) -> Result<LeaderboardResponse, ServiceError> {
    let store = state.require_store().await?;
    let players = store.list_ranked_players(LEADERBOARD_LIMIT).await?;

    let mut entries = Vec::with_capacity(players.len());
    for (index, player) in players.iter().enumerate() {
        let rank = index as u32 + 1;
        entries.push(LeaderboardEntry::from_player(rank, player));
        store.set_player_rank(player.id, rank).await?;
    }

    let top30_cutoff = entries
        .get(TOP_CUTOFF - 1)
        .map(|entry| entry.points)
        .unwrap_or(0);

    Ok(LeaderboardResponse {
        leaderboard: entries,
        top30_cutoff,
    })
}

/// Points needed to sit in the top thirty.
pub async fn top30(state: &SharedState) -> Result<Top30Response, ServiceError> {
    let store = state.require_store().await?;
    let players = store.list_ranked_players(TOP_CUTOFF as i64).await?;

    let cutoff = players
        .get(TOP_CUTOFF - 1)
        .map(|player| player.points)
        .unwrap_or(0);

    Ok(Top30Response {
        cutoff,
        count: players.len(),
    })
}

/// Award bonus points to a player, with a ledger entry.
pub async fn award(
    state: &SharedState,
    staff: &Claims,
    payload: AwardPointsRequest,
) -> Result<AwardPointsResponse, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    let player = store
        .add_player_points(payload.player_id, payload.points)
        .await?
        .ok_or_else(|| ServiceError::NotFound("player not found".into()))?;

    let transaction = PointsTransactionEntity {
        id: uuid::Uuid::new_v4(),
        player_id: player.id,
        player_name: Some(player.display_name()),
        points: payload.points,
        kind: PointsKind::Bonus,
        description: Some(payload.reason.clone()),
        awarded_by: Some(staff.sub),
        created_at: std::time::SystemTime::now(),
    };
    store.insert_points_transaction(transaction).await?;

    let mut log = ActivityEntity::new(ActivityAction::Points);
    log.player_id = Some(player.id);
    log.player_name = Some(player.display_name());
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some(format!(
        "Awarded {} points ({})",
        payload.points, payload.reason
    ));
    store.append_activity(log).await?;

    Ok(AwardPointsResponse {
        message: format!("Awarded {} points", payload.points),
        new_total: player.points,
    })
}
