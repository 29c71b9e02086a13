//! First-connect seeding: the fixed game catalog, the two jackpots and a
//! default staff roster. Each block only runs against an empty collection.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    auth,
    dao::{
        models::{CashGameEntity, FlushJackpotEntity, FlushSession, StaffEntity, StaffRole},
        storage::RoomStore,
    },
    error::ServiceError,
};

/// Seed whatever defaults are missing.
pub async fn ensure_defaults(store: &Arc<dyn RoomStore>) -> Result<(), ServiceError> {
    if store.count_games().await? == 0 {
        for (game_code, name, stakes, min_buyin, max_buyin) in [
            ("nlh-1-3", "No Limit Hold'em", "$1/$3", 100, 300),
            ("nlh-2-5", "No Limit Hold'em", "$2/$5", 200, 500),
            ("plo-1-3", "Pot Limit Omaha", "$1/$3", 100, 300),
            ("roe-5", "Round of Each", "$5 ROE", 100, 500),
            ("o8-4-8", "Omaha Hi-Lo", "$4/$8", 100, 300),
        ] {
            store
                .insert_game(CashGameEntity {
                    id: Uuid::new_v4(),
                    game_code: game_code.into(),
                    name: name.into(),
                    stakes: stakes.into(),
                    min_buyin,
                    max_buyin,
                    is_active: true,
                })
                .await?;
        }
        info!("seeded default game catalog");
    }

    if store.count_staff().await? == 0 {
        for (username, password, name, role) in [
            ("admin", "admin123", "Admin", StaffRole::Admin),
            ("candy", "candy123", "Candy", StaffRole::Manager),
            ("maria", "maria123", "Maria G", StaffRole::Floor),
        ] {
            store
                .insert_staff(StaffEntity {
                    id: Uuid::new_v4(),
                    username: username.into(),
                    password_hash: auth::hash_secret(password)?,
                    name: name.into(),
                    role,
                    created_at: SystemTime::now(),
                })
                .await?;
        }
        info!("seeded default staff accounts");
    }

    if store.list_flush_jackpots().await?.is_empty() {
        for (session, name, hours, amount, base_amount, daily_increment) in [
            (
                FlushSession::FlushShine,
                "Flush & Shine",
                "2PM-8PM",
                3000,
                1000,
                250,
            ),
            (FlushSession::LastCall, "Last Call", "8PM-2AM", 1150, 500, 50),
        ] {
            store
                .insert_flush_jackpot(FlushJackpotEntity {
                    id: Uuid::new_v4(),
                    session,
                    name: name.into(),
                    hours: hours.into(),
                    amount,
                    base_amount,
                    daily_increment,
                    last_won_date: None,
                    last_winner: None,
                })
                .await?;
        }
        info!("seeded flush jackpots");
    }

    Ok(())
}
