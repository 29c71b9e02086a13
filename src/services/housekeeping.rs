//! Once-a-minute floor housekeeping: expired waitlist calls, the daily
//! jackpot bump and end-of-session flush cleanup. Skips ticks while the
//! store is degraded.

use std::time::{Duration, SystemTime};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::models::{FlushSession, WaitlistStatus},
    services::rules,
    state::SharedState,
};

const TICK: Duration = Duration::from_secs(60);

/// Run the housekeeping loop forever.
pub async fn run_housekeeping(state: SharedState) {
    let offset = state.config().venue_utc_offset_hours;
    let mut last_date: Option<String> = None;
    let mut last_session: Option<Option<FlushSession>> = None;

    loop {
        sleep(TICK).await;

        let Some(store) = state.store().await else {
            continue;
        };

        // Expired calls lose their spot; they are never requeued.
        match store.list_expired_called(SystemTime::now()).await {
            Ok(expired) => {
                for mut entry in expired {
                    entry.status = WaitlistStatus::Removed;
                    entry.removed_at = Some(SystemTime::now());
                    if let Err(err) = store.save_waitlist_entry(entry.clone()).await {
                        warn!(error = %err, "failed to expire waitlist entry");
                        continue;
                    }
                    info!(
                        player = %entry.player_name,
                        game = %entry.game_code,
                        "waitlist entry expired"
                    );
                }
            }
            Err(err) => warn!(error = %err, "waitlist expiry sweep failed"),
        }

        let now = rules::venue_now(offset);
        let today = rules::session_date(now);

        match &last_date {
            Some(date) if *date != today => {
                if let Err(err) = store.apply_daily_jackpot_increment().await {
                    warn!(error = %err, "daily jackpot increment failed");
                } else {
                    info!("jackpots incremented for the new day");
                }
                last_date = Some(today);
            }
            Some(_) => {}
            None => last_date = Some(today),
        }

        let session_now = rules::session_for_hour(now.hour());
        match last_session {
            Some(previous) if previous != session_now => {
                // A window just closed; incomplete progress does not carry
                // over to the next session.
                if let Some(ended) = previous {
                    match store.delete_incomplete_flush_progress(ended).await {
                        Ok(removed) => info!(
                            session = ended.as_str(),
                            removed, "purged incomplete flush progress"
                        ),
                        Err(err) => warn!(error = %err, "flush progress purge failed"),
                    }
                }
                last_session = Some(session_now);
            }
            Some(_) => {}
            None => last_session = Some(session_now),
        }
    }
}
