//! Outbound email through a transactional-email HTTP API. Strictly
//! fire-and-forget: a lost notification never fails or rolls back the
//! operation that triggered it, and there is no retry.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    config::EmailConfig,
    dao::models::WaitlistEntryEntity,
    dao::storage::RoomStore,
    state::SharedState,
};

#[derive(Serialize)]
struct EmailPayload {
    from: String,
    to: String,
    subject: String,
    text: String,
}

/// Tell a called player their seat is ready, if we can find an address for
/// their card. Spawned off the request path.
pub fn spawn_seat_ready_email(
    state: &SharedState,
    store: Arc<dyn RoomStore>,
    entry: &WaitlistEntryEntity,
) {
    let Some(config) = state.config().email.clone() else {
        debug!("email notifications disabled; skipping seat-ready email");
        return;
    };
    let Some(card_number) = entry.card_number.clone() else {
        return;
    };
    let player_name = entry.player_name.clone();
    let game_code = entry.game_code.clone();

    tokio::spawn(async move {
        let player = match store.find_player_by_card(card_number).await {
            Ok(Some(player)) => player,
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "player lookup for seat-ready email failed");
                return;
            }
        };
        let Some(email) = player.email else {
            return;
        };

        let payload = EmailPayload {
            from: config.from.clone(),
            to: email,
            subject: "Your seat is ready".into(),
            text: format!(
                "{player_name}, your {game_code} seat is ready. \
                 Please see the floor within 30 minutes to keep your spot."
            ),
        };

        if let Err(err) = send(&config, &payload).await {
            warn!(error = %err, "seat-ready email failed");
        }
    });
}

async fn send(config: &EmailConfig, payload: &EmailPayload) -> Result<(), reqwest::Error> {
    let response = reqwest::Client::new()
        .post(&config.api_url)
        .bearer_auth(&config.api_key)
        .json(payload)
        .send()
        .await?;

    if let Err(err) = response.error_for_status_ref() {
        return Err(err);
    }
    debug!(to = %payload.to, "seat-ready email accepted");
    Ok(())
}
