//! Store handle, index bootstrap and the [`RoomStore`] trait wiring. The
//! per-collection queries live in the sibling `players`, `floor` and `events`
//! modules.

use std::time::SystemTime;

use futures::future::BoxFuture;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        ActivityDocument, CheckinDocument, FlushJackpotDocument, FlushProgressDocument,
        FoodOrderDocument, PlayerDocument, PointsTransactionDocument, RegistrationDocument,
        SeatDocument, StaffDocument, TableDocument, TournamentDocument, WaitlistEntryDocument,
    },
};
use crate::dao::{
    models::{
        ActivityEntity, ActivityFilter, CashGameEntity, CheckinEntity, FlushJackpotEntity,
        FlushProgressEntity, FlushSession, FoodOrderEntity, OrderStatus, PlayerEntity,
        PointsTransactionEntity, RegistrationEntity, SeatEntity, StaffEntity, TableEntity,
        TournamentEntity, WaitlistEntryEntity,
    },
    storage::{RoomStore, StorageResult},
};

pub(super) const PLAYERS: &str = "players";
pub(super) const STAFF: &str = "staff";
pub(super) const GAMES: &str = "games";
pub(super) const TABLES: &str = "tables";
pub(super) const SEATS: &str = "seats";
pub(super) const WAITLIST: &str = "waitlist";
pub(super) const TOURNAMENTS: &str = "tournaments";
pub(super) const REGISTRATIONS: &str = "tournament_registrations";
pub(super) const FLUSH_PROGRESS: &str = "flush_progress";
pub(super) const FLUSH_JACKPOTS: &str = "flush_jackpots";
pub(super) const FOOD_ORDERS: &str = "food_orders";
pub(super) const CHECKINS: &str = "player_checkins";
pub(super) const POINTS_TRANSACTIONS: &str = "points_transactions";
pub(super) const ACTIVITY_LOG: &str = "activity_log";

/// MongoDB-backed [`RoomStore`].
#[derive(Clone)]
pub struct MongoRoomStore {
    database: Database,
}

impl MongoRoomStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (_client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let store = Self { database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        self.create_index(
            PLAYERS,
            "card_number",
            doc! {"card_number": 1},
            "player_card_idx",
            true,
        )
        .await?;
        self.create_index(
            STAFF,
            "username",
            doc! {"username": 1},
            "staff_username_idx",
            true,
        )
        .await?;
        self.create_index(
            GAMES,
            "game_code",
            doc! {"game_code": 1},
            "game_code_idx",
            true,
        )
        .await?;
        // One document per occupied seat; the compound index is the backstop
        // for the occupancy check-then-insert.
        self.create_index(
            SEATS,
            "table_number,seat_number",
            doc! {"table_number": 1, "seat_number": 1},
            "seat_table_idx",
            true,
        )
        .await?;
        self.create_index(
            REGISTRATIONS,
            "tournament_id,phone",
            doc! {"tournament_id": 1, "phone": 1},
            "registration_phone_idx",
            true,
        )
        .await?;
        self.create_index(
            FLUSH_JACKPOTS,
            "session",
            doc! {"session": 1},
            "jackpot_session_idx",
            true,
        )
        .await?;
        self.create_index(
            WAITLIST,
            "game_code,status",
            doc! {"game_code": 1, "status": 1},
            "waitlist_game_idx",
            false,
        )
        .await?;
        self.create_index(
            ACTIVITY_LOG,
            "created_at",
            doc! {"created_at": -1},
            "activity_created_idx",
            false,
        )
        .await?;

        Ok(())
    }

    async fn create_index(
        &self,
        collection: &'static str,
        index: &'static str,
        keys: mongodb::bson::Document,
        name: &str,
        unique: bool,
    ) -> MongoResult<()> {
        let model = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .name(Some(name.to_owned()))
                    .unique(unique.then_some(true))
                    .build(),
            )
            .build();

        self.database
            .collection::<mongodb::bson::Document>(collection)
            .create_index(model)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection,
                index,
                source,
            })?;

        Ok(())
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    pub(super) fn players(&self) -> Collection<PlayerDocument> {
        self.database.collection(PLAYERS)
    }

    pub(super) fn staff(&self) -> Collection<StaffDocument> {
        self.database.collection(STAFF)
    }

    pub(super) fn games(&self) -> Collection<CashGameEntity> {
        self.database.collection(GAMES)
    }

    pub(super) fn tables(&self) -> Collection<TableDocument> {
        self.database.collection(TABLES)
    }

    pub(super) fn seats(&self) -> Collection<SeatDocument> {
        self.database.collection(SEATS)
    }

    pub(super) fn waitlist(&self) -> Collection<WaitlistEntryDocument> {
        self.database.collection(WAITLIST)
    }

    pub(super) fn tournaments(&self) -> Collection<TournamentDocument> {
        self.database.collection(TOURNAMENTS)
    }

    pub(super) fn registrations(&self) -> Collection<RegistrationDocument> {
        self.database.collection(REGISTRATIONS)
    }

    pub(super) fn flush_progress(&self) -> Collection<FlushProgressDocument> {
        self.database.collection(FLUSH_PROGRESS)
    }

    pub(super) fn flush_jackpots(&self) -> Collection<FlushJackpotDocument> {
        self.database.collection(FLUSH_JACKPOTS)
    }

    pub(super) fn food_orders(&self) -> Collection<FoodOrderDocument> {
        self.database.collection(FOOD_ORDERS)
    }

    pub(super) fn checkins(&self) -> Collection<CheckinDocument> {
        self.database.collection(CHECKINS)
    }

    pub(super) fn points_transactions(&self) -> Collection<PointsTransactionDocument> {
        self.database.collection(POINTS_TRANSACTIONS)
    }

    pub(super) fn activity_log(&self) -> Collection<ActivityDocument> {
        self.database.collection(ACTIVITY_LOG)
    }
}

impl RoomStore for MongoRoomStore {
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_player(player).await.map_err(Into::into) })
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player(id).await.map_err(Into::into) })
    }

    fn find_player_by_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_player_by_card(&card_number)
                .await
                .map_err(Into::into)
        })
    }

    fn find_player_by_phone(
        &self,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player_by_phone(&phone).await.map_err(Into::into) })
    }

    fn search_players(
        &self,
        search: Option<String>,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .search_players(search.as_deref(), limit)
                .await
                .map_err(Into::into)
        })
    }

    fn add_player_points(
        &self,
        id: Uuid,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.add_player_points(id, delta).await.map_err(Into::into) })
    }

    fn set_player_rank(&self, id: Uuid, rank: u32) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.set_player_rank(id, rank).await.map_err(Into::into) })
    }

    fn list_ranked_players(
        &self,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_ranked_players(limit).await.map_err(Into::into) })
    }

    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_staff(staff).await.map_err(Into::into) })
    }

    fn find_staff_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_staff_by_username(&username)
                .await
                .map_err(Into::into)
        })
    }

    fn count_staff(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_staff().await.map_err(Into::into) })
    }

    fn insert_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_game(game).await.map_err(Into::into) })
    }

    fn list_active_games(&self) -> BoxFuture<'static, StorageResult<Vec<CashGameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_active_games().await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn find_game_by_code(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game_by_code(&game_code).await.map_err(Into::into) })
    }

    fn save_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_game(game).await.map_err(Into::into) })
    }

    fn count_games(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_games().await.map_err(Into::into) })
    }

    fn insert_table(&self, table: TableEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_table(table).await.map_err(Into::into) })
    }

    fn list_open_tables(&self) -> BoxFuture<'static, StorageResult<Vec<TableEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_open_tables().await.map_err(Into::into) })
    }

    fn find_table_by_number(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_table_by_number(table_number)
                .await
                .map_err(Into::into)
        })
    }

    fn find_open_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_open_table(table_number).await.map_err(Into::into) })
    }

    fn close_table(
        &self,
        table_number: u32,
        closed_at: SystemTime,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .close_table(table_number, closed_at)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_seat(seat).await.map_err(Into::into) })
    }

    fn list_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_seats_for_table(table_number)
                .await
                .map_err(Into::into)
        })
    }

    fn count_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .count_seats_for_table(table_number)
                .await
                .map_err(Into::into)
        })
    }

    fn find_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<SeatEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_seat(table_number, seat_number)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_seat(table_number, seat_number)
                .await
                .map_err(Into::into)
        })
    }

    fn delete_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_seats_for_table(table_number)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_waitlist_entry(entry).await.map_err(Into::into) })
    }

    fn find_waitlist_entry(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_waitlist_entry(id).await.map_err(Into::into) })
    }

    fn save_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_waitlist_entry(entry).await.map_err(Into::into) })
    }

    fn list_active_waitlist(&self) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_active_waitlist().await.map_err(Into::into) })
    }

    fn list_active_waitlist_for_game(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_active_waitlist_for_game(&game_code)
                .await
                .map_err(Into::into)
        })
    }

    fn list_active_waitlist_for_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_active_waitlist_for_card(&card_number)
                .await
                .map_err(Into::into)
        })
    }

    fn last_waitlist_position(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .last_waitlist_position(&game_code)
                .await
                .map_err(Into::into)
        })
    }

    fn list_waiting_after(
        &self,
        game_code: String,
        position: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_waiting_after(&game_code, position)
                .await
                .map_err(Into::into)
        })
    }

    fn list_expired_called(
        &self,
        now: SystemTime,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_expired_called(now).await.map_err(Into::into) })
    }

    fn count_active_waitlist(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_active_waitlist().await.map_err(Into::into) })
    }

    fn insert_tournament(
        &self,
        tournament: TournamentEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_tournament(tournament).await.map_err(Into::into) })
    }

    fn list_active_tournaments(&self) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_active_tournaments().await.map_err(Into::into) })
    }

    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_tournament(id).await.map_err(Into::into) })
    }

    fn insert_registration(
        &self,
        registration: RegistrationEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_registration(registration)
                .await
                .map_err(Into::into)
        })
    }

    fn list_registrations(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RegistrationEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_registrations(tournament_id)
                .await
                .map_err(Into::into)
        })
    }

    fn find_registration_by_phone(
        &self,
        tournament_id: Uuid,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<RegistrationEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_registration_by_phone(tournament_id, &phone)
                .await
                .map_err(Into::into)
        })
    }

    fn increment_registered_count(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .increment_registered_count(tournament_id)
                .await
                .map_err(Into::into)
        })
    }

    fn find_flush_progress(
        &self,
        player_id: Uuid,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Option<FlushProgressEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_flush_progress(player_id, session, &session_date)
                .await
                .map_err(Into::into)
        })
    }

    fn save_flush_progress(
        &self,
        progress: FlushProgressEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_flush_progress(progress).await.map_err(Into::into) })
    }

    fn list_flush_progress(
        &self,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_flush_progress(session, &session_date)
                .await
                .map_err(Into::into)
        })
    }

    fn list_all_flush_progress(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_all_flush_progress().await.map_err(Into::into) })
    }

    fn delete_all_flush_progress(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.delete_all_flush_progress().await.map_err(Into::into) })
    }

    fn delete_incomplete_flush_progress(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_incomplete_flush_progress(session)
                .await
                .map_err(Into::into)
        })
    }

    fn insert_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_flush_jackpot(jackpot).await.map_err(Into::into) })
    }

    fn list_flush_jackpots(&self) -> BoxFuture<'static, StorageResult<Vec<FlushJackpotEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_flush_jackpots().await.map_err(Into::into) })
    }

    fn find_flush_jackpot(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<Option<FlushJackpotEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_flush_jackpot(session).await.map_err(Into::into) })
    }

    fn save_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_flush_jackpot(jackpot).await.map_err(Into::into) })
    }

    fn apply_daily_jackpot_increment(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .apply_daily_jackpot_increment()
                .await
                .map_err(Into::into)
        })
    }

    fn insert_food_order(&self, order: FoodOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_food_order(order).await.map_err(Into::into) })
    }

    fn find_food_order(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<FoodOrderEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_food_order(id).await.map_err(Into::into) })
    }

    fn save_food_order(&self, order: FoodOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_food_order(order).await.map_err(Into::into) })
    }

    fn list_orders_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> BoxFuture<'static, StorageResult<Vec<FoodOrderEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .list_orders_by_status(&statuses)
                .await
                .map_err(Into::into)
        })
    }

    fn count_food_orders(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_food_orders().await.map_err(Into::into) })
    }

    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_checkin(checkin).await.map_err(Into::into) })
    }

    fn find_open_checkin(
        &self,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CheckinEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_open_checkin(player_id).await.map_err(Into::into) })
    }

    fn save_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_checkin(checkin).await.map_err(Into::into) })
    }

    fn insert_points_transaction(
        &self,
        transaction: PointsTransactionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_points_transaction(transaction)
                .await
                .map_err(Into::into)
        })
    }

    fn append_activity(&self, entry: ActivityEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.append_activity(entry).await.map_err(Into::into) })
    }

    fn list_activity(
        &self,
        filter: ActivityFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<ActivityEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_activity(filter).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
