//! Storage abstraction: every collection the room uses, behind one trait so
//! the HTTP layer never touches driver types.

use std::error::Error;
use std::time::SystemTime;

use futures::future::BoxFuture;
use thiserror::Error;
use uuid::Uuid;

use crate::dao::models::{
    ActivityEntity, ActivityFilter, CashGameEntity, CheckinEntity, FlushJackpotEntity,
    FlushProgressEntity, FlushSession, FoodOrderEntity, OrderStatus, PlayerEntity,
    PointsTransactionEntity, RegistrationEntity, SeatEntity, StaffEntity, TableEntity,
    TournamentEntity, WaitlistEntryEntity,
};

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Persistence operations for the whole room. Documents are flat; methods map
/// one-to-one onto collection reads and writes, with no cross-document
/// atomicity beyond what unique indexes provide.
pub trait RoomStore: Send + Sync {
    // -- players ------------------------------------------------------------

    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    fn find_player_by_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    fn find_player_by_phone(
        &self,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    /// Name-prefix or card-substring search; `None` lists everyone up to `limit`.
    fn search_players(
        &self,
        search: Option<String>,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Add `delta` to the player's balance and return the updated player.
    fn add_player_points(
        &self,
        id: Uuid,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    fn set_player_rank(
        &self,
        id: Uuid,
        rank: u32,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Players with a positive balance, highest first.
    fn list_ranked_players(
        &self,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;

    // -- staff --------------------------------------------------------------

    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_staff_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>>;
    fn count_staff(&self) -> BoxFuture<'static, StorageResult<u64>>;

    // -- cash game catalog --------------------------------------------------

    fn insert_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn list_active_games(&self) -> BoxFuture<'static, StorageResult<Vec<CashGameEntity>>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>>;
    fn find_game_by_code(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>>;
    fn save_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn count_games(&self) -> BoxFuture<'static, StorageResult<u64>>;

    // -- tables & seats -----------------------------------------------------

    fn insert_table(&self, table: TableEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Tables whose status is not `closed`.
    fn list_open_tables(&self) -> BoxFuture<'static, StorageResult<Vec<TableEntity>>>;
    fn find_table_by_number(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>>;
    /// An open table with this number, if any.
    fn find_open_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>>;
    fn close_table(
        &self,
        table_number: u32,
        closed_at: SystemTime,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn insert_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn list_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>>;
    fn count_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    fn find_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<SeatEntity>>>;
    fn delete_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    fn delete_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<u64>>;

    // -- waitlist -----------------------------------------------------------

    fn insert_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn find_waitlist_entry(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<WaitlistEntryEntity>>>;
    /// Replace the entry document wholesale.
    fn save_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Active (waiting|called) entries across all games, by position.
    fn list_active_waitlist(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>>;
    /// Active entries for one game, by position.
    fn list_active_waitlist_for_game(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>>;
    fn list_active_waitlist_for_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>>;
    /// Highest active position in the game, if anyone is queued.
    fn last_waitlist_position(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>>;
    /// `waiting` entries for the game strictly after `position`, by position.
    fn list_waiting_after(
        &self,
        game_code: String,
        position: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>>;
    /// `called` entries whose expiry is before `now`.
    fn list_expired_called(
        &self,
        now: SystemTime,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>>;
    fn count_active_waitlist(&self) -> BoxFuture<'static, StorageResult<u64>>;

    // -- tournaments --------------------------------------------------------

    fn insert_tournament(
        &self,
        tournament: TournamentEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn list_active_tournaments(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>>;
    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>>;
    fn insert_registration(
        &self,
        registration: RegistrationEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn list_registrations(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RegistrationEntity>>>;
    fn find_registration_by_phone(
        &self,
        tournament_id: Uuid,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<RegistrationEntity>>>;
    fn increment_registered_count(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>>;

    // -- flush promotion ----------------------------------------------------

    fn find_flush_progress(
        &self,
        player_id: Uuid,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Option<FlushProgressEntity>>>;
    fn save_flush_progress(
        &self,
        progress: FlushProgressEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn list_flush_progress(
        &self,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>>;
    fn list_all_flush_progress(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>>;
    fn delete_all_flush_progress(&self) -> BoxFuture<'static, StorageResult<u64>>;
    /// Purge a session's entries that never completed.
    fn delete_incomplete_flush_progress(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    fn insert_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn list_flush_jackpots(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushJackpotEntity>>>;
    fn find_flush_jackpot(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<Option<FlushJackpotEntity>>>;
    fn save_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Add each jackpot's own daily increment to its amount.
    fn apply_daily_jackpot_increment(&self) -> BoxFuture<'static, StorageResult<()>>;

    // -- food orders --------------------------------------------------------

    fn insert_food_order(
        &self,
        order: FoodOrderEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    fn find_food_order(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<FoodOrderEntity>>>;
    fn save_food_order(
        &self,
        order: FoodOrderEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Orders in the given statuses, oldest first.
    fn list_orders_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> BoxFuture<'static, StorageResult<Vec<FoodOrderEntity>>>;
    fn count_food_orders(&self) -> BoxFuture<'static, StorageResult<u64>>;

    // -- checkins & points --------------------------------------------------

    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// The most recent checkin without a checkout, if any.
    fn find_open_checkin(
        &self,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CheckinEntity>>>;
    fn save_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn insert_points_transaction(
        &self,
        transaction: PointsTransactionEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;

    // -- activity log -------------------------------------------------------

    fn append_activity(&self, entry: ActivityEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Newest first, filtered.
    fn list_activity(
        &self,
        filter: ActivityFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<ActivityEntity>>>;

    // -- health -------------------------------------------------------------

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
