//! Service-level flows exercised against an in-memory store: registration
//! uniqueness, waitlist ordering, seat exclusivity, checkout point tiers,
//! flush completion and tournament counters.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use futures::future::{BoxFuture, ready};
use time::OffsetDateTime;
use uuid::Uuid;

use poker_room_back::{
    auth::{Claims, TokenKind},
    config::AppConfig,
    dao::{
        models::{
            ActivityAction, ActivityEntity, ActivityFilter, CashGameEntity, CheckinEntity,
            FlushJackpotEntity, FlushProgressEntity, FlushSession, FoodOrderEntity, OrderStatus,
            PlayerEntity, PointsTransactionEntity, RegistrationEntity, SeatEntity, StaffEntity,
            StaffRole, TableEntity, TournamentEntity, WaitlistEntryEntity, WaitlistStatus,
        },
        storage::{RoomStore, StorageResult},
    },
    dto::{
        auth::PlayerRegisterRequest,
        flush::AwardSuitRequest,
        points::AwardPointsRequest,
        table::{OpenTableRequest, SeatPlayerRequest},
        tournament::{CreateTournamentRequest, RegisterRequest},
        waitlist::{JoinWaitlistRequest, SeatFromWaitlistRequest},
    },
    error::ServiceError,
    services::{
        auth_service, bootstrap, flush_service, player_service, points_service, table_service,
        tournament_service, waitlist_service,
    },
    state::{AppState, SharedState},
};

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Vec-backed [`RoomStore`]. Every operation completes synchronously, so each
/// method computes eagerly and wraps the result in a ready future.
#[derive(Default)]
struct MemoryStore {
    players: Mutex<Vec<PlayerEntity>>,
    staff: Mutex<Vec<StaffEntity>>,
    games: Mutex<Vec<CashGameEntity>>,
    tables: Mutex<Vec<TableEntity>>,
    seats: Mutex<Vec<SeatEntity>>,
    waitlist: Mutex<Vec<WaitlistEntryEntity>>,
    tournaments: Mutex<Vec<TournamentEntity>>,
    registrations: Mutex<Vec<RegistrationEntity>>,
    flush_progress: Mutex<Vec<FlushProgressEntity>>,
    flush_jackpots: Mutex<Vec<FlushJackpotEntity>>,
    orders: Mutex<Vec<FoodOrderEntity>>,
    checkins: Mutex<Vec<CheckinEntity>>,
    transactions: Mutex<Vec<PointsTransactionEntity>>,
    activity: Mutex<Vec<ActivityEntity>>,
}

fn ok<T: Send + 'static>(value: T) -> BoxFuture<'static, StorageResult<T>> {
    Box::pin(ready(Ok(value)))
}

impl RoomStore for MemoryStore {
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.players.lock().unwrap().push(player);
        ok(())
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn find_player_by_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.card_number == card_number)
            .cloned())
    }

    fn find_player_by_phone(
        &self,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        ok(self
            .players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.phone == phone)
            .cloned())
    }

    fn search_players(
        &self,
        search: Option<String>,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let players = self.players.lock().unwrap();
        let matches: Vec<PlayerEntity> = players
            .iter()
            .filter(|p| match &search {
                Some(term) => {
                    let term_lower = term.to_lowercase();
                    p.first_name.to_lowercase().contains(&term_lower)
                        || p.card_number.contains(term.as_str())
                }
                None => true,
            })
            .take(limit as usize)
            .cloned()
            .collect();
        ok(matches)
    }

    fn add_player_points(
        &self,
        id: Uuid,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let mut players = self.players.lock().unwrap();
        let updated = players.iter_mut().find(|p| p.id == id).map(|p| {
            p.points += delta;
            p.updated_at = SystemTime::now();
            p.clone()
        });
        ok(updated)
    }

    fn set_player_rank(&self, id: Uuid, rank: u32) -> BoxFuture<'static, StorageResult<()>> {
        if let Some(p) = self.players.lock().unwrap().iter_mut().find(|p| p.id == id) {
            p.rank = Some(rank);
        }
        ok(())
    }

    fn list_ranked_players(
        &self,
        limit: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let mut players: Vec<PlayerEntity> = self
            .players
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.points > 0)
            .cloned()
            .collect();
        players.sort_by(|a, b| b.points.cmp(&a.points));
        players.truncate(limit as usize);
        ok(players)
    }

    fn insert_staff(&self, staff: StaffEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.staff.lock().unwrap().push(staff);
        ok(())
    }

    fn find_staff_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<StaffEntity>>> {
        ok(self
            .staff
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.username == username)
            .cloned())
    }

    fn count_staff(&self) -> BoxFuture<'static, StorageResult<u64>> {
        ok(self.staff.lock().unwrap().len() as u64)
    }

    fn insert_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.games.lock().unwrap().push(game);
        ok(())
    }

    fn list_active_games(&self) -> BoxFuture<'static, StorageResult<Vec<CashGameEntity>>> {
        ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.is_active)
            .cloned()
            .collect())
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>> {
        ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    fn find_game_by_code(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<CashGameEntity>>> {
        ok(self
            .games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.game_code == game_code)
            .cloned())
    }

    fn save_game(&self, game: CashGameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut games = self.games.lock().unwrap();
        if let Some(existing) = games.iter_mut().find(|g| g.id == game.id) {
            *existing = game;
        } else {
            games.push(game);
        }
        ok(())
    }

    fn count_games(&self) -> BoxFuture<'static, StorageResult<u64>> {
        ok(self.games.lock().unwrap().len() as u64)
    }

    fn insert_table(&self, table: TableEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.tables.lock().unwrap().push(table);
        ok(())
    }

    fn list_open_tables(&self) -> BoxFuture<'static, StorageResult<Vec<TableEntity>>> {
        ok(self
            .tables
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.status != poker_room_back::dao::models::TableStatus::Closed)
            .cloned()
            .collect())
    }

    fn find_table_by_number(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>> {
        ok(self
            .tables
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.table_number == table_number)
            .cloned())
    }

    fn find_open_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<TableEntity>>> {
        ok(self
            .tables
            .lock()
            .unwrap()
            .iter()
            .find(|t| {
                t.table_number == table_number
                    && t.status == poker_room_back::dao::models::TableStatus::Open
            })
            .cloned())
    }

    fn close_table(
        &self,
        table_number: u32,
        closed_at: SystemTime,
    ) -> BoxFuture<'static, StorageResult<()>> {
        for table in self
            .tables
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|t| t.table_number == table_number)
        {
            table.status = poker_room_back::dao::models::TableStatus::Closed;
            table.closed_at = Some(closed_at);
        }
        ok(())
    }

    fn insert_seat(&self, seat: SeatEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.seats.lock().unwrap().push(seat);
        ok(())
    }

    fn list_seats_for_table(
        &self,
        table_number: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<SeatEntity>>> {
        ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.table_number == table_number)
            .cloned()
            .collect())
    }

    fn count_seats_for_table(&self, table_number: u32) -> BoxFuture<'static, StorageResult<u64>> {
        ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.table_number == table_number)
            .count() as u64)
    }

    fn find_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<Option<SeatEntity>>> {
        ok(self
            .seats
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.table_number == table_number && s.seat_number == seat_number)
            .cloned())
    }

    fn delete_seat(
        &self,
        table_number: u32,
        seat_number: u32,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let mut seats = self.seats.lock().unwrap();
        let before = seats.len();
        seats.retain(|s| !(s.table_number == table_number && s.seat_number == seat_number));
        ok(seats.len() < before)
    }

    fn delete_seats_for_table(&self, table_number: u32) -> BoxFuture<'static, StorageResult<u64>> {
        let mut seats = self.seats.lock().unwrap();
        let before = seats.len();
        seats.retain(|s| s.table_number != table_number);
        ok((before - seats.len()) as u64)
    }

    fn insert_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.waitlist.lock().unwrap().push(entry);
        ok(())
    }

    fn find_waitlist_entry(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<WaitlistEntryEntity>>> {
        ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    fn save_waitlist_entry(
        &self,
        entry: WaitlistEntryEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let mut waitlist = self.waitlist.lock().unwrap();
        if let Some(existing) = waitlist.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        } else {
            waitlist.push(entry);
        }
        ok(())
    }

    fn list_active_waitlist(&self) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let mut entries: Vec<WaitlistEntryEntity> = self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status.is_active())
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.position);
        ok(entries)
    }

    fn list_active_waitlist_for_game(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let mut entries: Vec<WaitlistEntryEntity> = self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.game_code == game_code && e.status.is_active())
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.position);
        ok(entries)
    }

    fn list_active_waitlist_for_card(
        &self,
        card_number: String,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.card_number.as_deref() == Some(card_number.as_str()))
            .filter(|e| e.status.is_active())
            .cloned()
            .collect())
    }

    fn last_waitlist_position(
        &self,
        game_code: String,
    ) -> BoxFuture<'static, StorageResult<Option<u32>>> {
        ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.game_code == game_code && e.status.is_active())
            .map(|e| e.position)
            .max())
    }

    fn list_waiting_after(
        &self,
        game_code: String,
        position: u32,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        let mut entries: Vec<WaitlistEntryEntity> = self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.game_code == game_code
                    && e.status == WaitlistStatus::Waiting
                    && e.position > position
            })
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.position);
        ok(entries)
    }

    fn list_expired_called(
        &self,
        now: SystemTime,
    ) -> BoxFuture<'static, StorageResult<Vec<WaitlistEntryEntity>>> {
        ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == WaitlistStatus::Called)
            .filter(|e| e.expires_at.is_some_and(|at| at < now))
            .cloned()
            .collect())
    }

    fn count_active_waitlist(&self) -> BoxFuture<'static, StorageResult<u64>> {
        ok(self
            .waitlist
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status.is_active())
            .count() as u64)
    }

    fn insert_tournament(
        &self,
        tournament: TournamentEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.tournaments.lock().unwrap().push(tournament);
        ok(())
    }

    fn list_active_tournaments(&self) -> BoxFuture<'static, StorageResult<Vec<TournamentEntity>>> {
        ok(self
            .tournaments
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect())
    }

    fn find_tournament(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<TournamentEntity>>> {
        ok(self
            .tournaments
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    fn insert_registration(
        &self,
        registration: RegistrationEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.registrations.lock().unwrap().push(registration);
        ok(())
    }

    fn list_registrations(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<RegistrationEntity>>> {
        ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn find_registration_by_phone(
        &self,
        tournament_id: Uuid,
        phone: String,
    ) -> BoxFuture<'static, StorageResult<Option<RegistrationEntity>>> {
        ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.tournament_id == tournament_id && r.phone == phone)
            .cloned())
    }

    fn increment_registered_count(
        &self,
        tournament_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<()>> {
        if let Some(t) = self
            .tournaments
            .lock()
            .unwrap()
            .iter_mut()
            .find(|t| t.id == tournament_id)
        {
            t.registered_count += 1;
        }
        ok(())
    }

    fn find_flush_progress(
        &self,
        player_id: Uuid,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Option<FlushProgressEntity>>> {
        ok(self
            .flush_progress
            .lock()
            .unwrap()
            .iter()
            .find(|p| {
                p.player_id == player_id
                    && p.session == session
                    && p.session_date == session_date
            })
            .cloned())
    }

    fn save_flush_progress(
        &self,
        progress: FlushProgressEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let mut all = self.flush_progress.lock().unwrap();
        if let Some(existing) = all.iter_mut().find(|p| p.id == progress.id) {
            *existing = progress;
        } else {
            all.push(progress);
        }
        ok(())
    }

    fn list_flush_progress(
        &self,
        session: FlushSession,
        session_date: String,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>> {
        ok(self
            .flush_progress
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.session == session && p.session_date == session_date)
            .cloned()
            .collect())
    }

    fn list_all_flush_progress(
        &self,
    ) -> BoxFuture<'static, StorageResult<Vec<FlushProgressEntity>>> {
        ok(self.flush_progress.lock().unwrap().clone())
    }

    fn delete_all_flush_progress(&self) -> BoxFuture<'static, StorageResult<u64>> {
        let mut all = self.flush_progress.lock().unwrap();
        let removed = all.len() as u64;
        all.clear();
        ok(removed)
    }

    fn delete_incomplete_flush_progress(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let mut all = self.flush_progress.lock().unwrap();
        let before = all.len();
        all.retain(|p| !(p.session == session && p.completed_at.is_none()));
        ok((before - all.len()) as u64)
    }

    fn insert_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.flush_jackpots.lock().unwrap().push(jackpot);
        ok(())
    }

    fn list_flush_jackpots(&self) -> BoxFuture<'static, StorageResult<Vec<FlushJackpotEntity>>> {
        ok(self.flush_jackpots.lock().unwrap().clone())
    }

    fn find_flush_jackpot(
        &self,
        session: FlushSession,
    ) -> BoxFuture<'static, StorageResult<Option<FlushJackpotEntity>>> {
        ok(self
            .flush_jackpots
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.session == session)
            .cloned())
    }

    fn save_flush_jackpot(
        &self,
        jackpot: FlushJackpotEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let mut jackpots = self.flush_jackpots.lock().unwrap();
        if let Some(existing) = jackpots.iter_mut().find(|j| j.id == jackpot.id) {
            *existing = jackpot;
        } else {
            jackpots.push(jackpot);
        }
        ok(())
    }

    fn apply_daily_jackpot_increment(&self) -> BoxFuture<'static, StorageResult<()>> {
        for jackpot in self.flush_jackpots.lock().unwrap().iter_mut() {
            jackpot.amount += jackpot.daily_increment;
        }
        ok(())
    }

    fn insert_food_order(&self, order: FoodOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.orders.lock().unwrap().push(order);
        ok(())
    }

    fn find_food_order(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<FoodOrderEntity>>> {
        ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    fn save_food_order(&self, order: FoodOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(existing) = orders.iter_mut().find(|o| o.id == order.id) {
            *existing = order;
        } else {
            orders.push(order);
        }
        ok(())
    }

    fn list_orders_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> BoxFuture<'static, StorageResult<Vec<FoodOrderEntity>>> {
        let mut orders: Vec<FoodOrderEntity> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        ok(orders)
    }

    fn count_food_orders(&self) -> BoxFuture<'static, StorageResult<u64>> {
        ok(self.orders.lock().unwrap().len() as u64)
    }

    fn insert_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.checkins.lock().unwrap().push(checkin);
        ok(())
    }

    fn find_open_checkin(
        &self,
        player_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CheckinEntity>>> {
        ok(self
            .checkins
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.player_id == player_id && c.checked_out_at.is_none())
            .max_by_key(|c| c.checked_in_at)
            .cloned())
    }

    fn save_checkin(&self, checkin: CheckinEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut checkins = self.checkins.lock().unwrap();
        if let Some(existing) = checkins.iter_mut().find(|c| c.id == checkin.id) {
            *existing = checkin;
        } else {
            checkins.push(checkin);
        }
        ok(())
    }

    fn insert_points_transaction(
        &self,
        transaction: PointsTransactionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.transactions.lock().unwrap().push(transaction);
        ok(())
    }

    fn append_activity(&self, entry: ActivityEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.activity.lock().unwrap().push(entry);
        ok(())
    }

    fn list_activity(
        &self,
        filter: ActivityFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<ActivityEntity>>> {
        let mut entries: Vec<ActivityEntity> = self
            .activity
            .lock()
            .unwrap()
            .iter()
            .filter(|e| filter.action.is_none_or(|action| e.action == action))
            .filter(|e| {
                filter
                    .staff_name
                    .as_deref()
                    .is_none_or(|name| e.staff_name == name)
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(filter.limit as usize);
        ok(entries)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    state: SharedState,
    store: Arc<MemoryStore>,
    staff: Claims,
}

/// Offset that places the venue clock at the given hour right now, so flush
/// session checks are deterministic in tests.
fn offset_for_hour(target_hour: u8) -> i8 {
    let utc_hour = OffsetDateTime::now_utc().hour();
    let mut offset = i16::from(target_hour) - i16::from(utc_hour);
    if offset > 12 {
        offset -= 24;
    }
    if offset < -12 {
        offset += 24;
    }
    offset as i8
}

async fn harness_with_offset(venue_utc_offset_hours: i8) -> Harness {
    let config = AppConfig {
        jwt_secret: "test-secret".into(),
        token_ttl: Duration::from_secs(3600),
        venue_utc_offset_hours,
        email: None,
    };
    let state = AppState::new(config);
    let store = Arc::new(MemoryStore::default());
    let dyn_store: Arc<dyn RoomStore> = store.clone();
    bootstrap::ensure_defaults(&dyn_store).await.unwrap();
    state.install_store(dyn_store).await;

    let staff = Claims {
        sub: Uuid::new_v4(),
        name: "Test Floor".into(),
        kind: TokenKind::Staff,
        role: Some(StaffRole::Floor),
        card_number: None,
        username: Some("testfloor".into()),
        iat: 0,
        exp: i64::MAX,
    };

    Harness {
        state,
        store,
        staff,
    }
}

async fn harness() -> Harness {
    harness_with_offset(0).await
}

fn register_request(first_name: &str, phone: &str) -> PlayerRegisterRequest {
    PlayerRegisterRequest {
        first_name: first_name.into(),
        last_initial: "T".into(),
        phone: phone.into(),
        email: None,
        pin: "1234".into(),
    }
}

fn join_request(name: &str, phone: &str, game_code: &str) -> JoinWaitlistRequest {
    JoinWaitlistRequest {
        player_name: name.into(),
        phone: phone.into(),
        card_number: None,
        game_code: game_code.into(),
        num_players: None,
        planned_buyin: None,
    }
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_phone_registration_is_rejected() {
    let h = harness().await;

    auth_service::register_player(&h.state, register_request("Dana", "9155550100"))
        .await
        .unwrap();

    let err = auth_service::register_player(&h.state, register_request("Dana", "9155550100"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn waitlist_positions_increase_per_game_independently() {
    let h = harness().await;

    for (name, phone) in [
        ("Ann", "9155550001"),
        ("Bob", "9155550002"),
        ("Cam", "9155550003"),
    ] {
        waitlist_service::join(&h.state, join_request(name, phone, "nlh-1-3"))
            .await
            .unwrap();
    }
    for (name, phone) in [("Dee", "9155550004"), ("Eli", "9155550005")] {
        waitlist_service::join(&h.state, join_request(name, phone, "plo-1-3"))
            .await
            .unwrap();
    }

    let nlh = waitlist_service::for_game(&h.state, "nlh-1-3".into())
        .await
        .unwrap();
    let positions: Vec<u32> = nlh.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let plo = waitlist_service::for_game(&h.state, "plo-1-3".into())
        .await
        .unwrap();
    let positions: Vec<u32> = plo.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2]);
}

#[tokio::test]
async fn joining_an_unknown_game_is_rejected() {
    let h = harness().await;
    let err = waitlist_service::join(&h.state, join_request("Ann", "9155550001", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn seating_from_waitlist_compacts_remaining_positions() {
    let h = harness().await;

    let first = waitlist_service::join(&h.state, join_request("Ann", "9155550001", "nlh-1-3"))
        .await
        .unwrap();
    for (name, phone) in [("Bob", "9155550002"), ("Cam", "9155550003")] {
        waitlist_service::join(&h.state, join_request(name, phone, "nlh-1-3"))
            .await
            .unwrap();
    }

    waitlist_service::seat(
        &h.state,
        &h.staff,
        first.entry.id,
        SeatFromWaitlistRequest {
            table_number: 7,
            seat_number: 3,
        },
    )
    .await
    .unwrap();

    let remaining = waitlist_service::for_game(&h.state, "nlh-1-3".into())
        .await
        .unwrap();
    let positions: Vec<u32> = remaining.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2]);
    assert_eq!(remaining[0].player_name, "Bob");
}

#[tokio::test]
async fn occupied_seat_is_rejected() {
    let h = harness().await;

    table_service::open(
        &h.state,
        &h.staff,
        OpenTableRequest {
            table_number: 4,
            game_code: "nlh-1-3".into(),
            capacity: None,
        },
    )
    .await
    .unwrap();

    let request = SeatPlayerRequest {
        player_id: None,
        player_name: "Ann T".into(),
        card_number: None,
    };
    table_service::seat_player(&h.state, &h.staff, 4, 2, request)
        .await
        .unwrap();

    let err = table_service::seat_player(
        &h.state,
        &h.staff,
        4,
        2,
        SeatPlayerRequest {
            player_id: None,
            player_name: "Bob T".into(),
            card_number: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn closing_a_table_deletes_its_seats() {
    let h = harness().await;

    table_service::open(
        &h.state,
        &h.staff,
        OpenTableRequest {
            table_number: 9,
            game_code: "plo-1-3".into(),
            capacity: Some(6),
        },
    )
    .await
    .unwrap();
    table_service::seat_player(
        &h.state,
        &h.staff,
        9,
        1,
        SeatPlayerRequest {
            player_id: None,
            player_name: "Ann T".into(),
            card_number: None,
        },
    )
    .await
    .unwrap();

    table_service::close(&h.state, &h.staff, 9).await.unwrap();
    assert!(h.store.seats.lock().unwrap().is_empty());
}

#[tokio::test]
async fn checkout_without_checkin_is_rejected() {
    let h = harness().await;

    let player = auth_service::register_player(&h.state, register_request("Dana", "9155550100"))
        .await
        .unwrap();

    let err = player_service::checkout(&h.state, &h.staff, player.player.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn checkout_points_scale_with_hours_played() {
    let h = harness().await;

    let mut earned = Vec::new();
    for (phone, hours_ago) in [
        ("9155550101", 7 * 3600),
        ("9155550102", 2 * 3600),
        ("9155550103", 30 * 60),
    ] {
        let player = auth_service::register_player(&h.state, register_request("Dana", phone))
            .await
            .unwrap();
        player_service::checkin(&h.state, &h.staff, player.player.id)
            .await
            .unwrap();

        // Backdate the open checkin to simulate the session length.
        {
            let mut checkins = h.store.checkins.lock().unwrap();
            let checkin = checkins
                .iter_mut()
                .find(|c| c.player_id == player.player.id)
                .unwrap();
            checkin.checked_in_at = SystemTime::now() - Duration::from_secs(hours_ago);
        }

        let out = player_service::checkout(&h.state, &h.staff, player.player.id)
            .await
            .unwrap();
        earned.push(out.points_earned);
    }

    assert_eq!(earned, vec![30, 10, 0]);
    assert!(earned[0] > earned[1] && earned[1] > earned[2]);
}

#[tokio::test]
async fn four_suits_in_one_session_wins_exactly_once() {
    // Pin the venue clock inside the Flush & Shine window.
    let h = harness_with_offset(offset_for_hour(15)).await;

    let player = auth_service::register_player(&h.state, register_request("Dana", "9155550100"))
        .await
        .unwrap();

    use poker_room_back::dao::models::Suit;
    for suit in [Suit::Spade, Suit::Heart, Suit::Diamond] {
        let response =
            flush_service::award_suit(&h.state, &h.staff, player.player.id, AwardSuitRequest { suit })
                .await
                .unwrap();
        assert!(response.count < 4);
    }

    let response = flush_service::award_suit(
        &h.state,
        &h.staff,
        player.player.id,
        AwardSuitRequest { suit: Suit::Club },
    )
    .await
    .unwrap();
    assert_eq!(response.count, 4);

    // Jackpot reset to its base amount and the winner recorded.
    let jackpot = h
        .store
        .flush_jackpots
        .lock()
        .unwrap()
        .iter()
        .find(|j| j.session == FlushSession::FlushShine)
        .cloned()
        .unwrap();
    assert_eq!(jackpot.amount, jackpot.base_amount);
    assert_eq!(jackpot.last_winner, Some(player.player.id));

    // A repeat award never produces a second winner entry.
    flush_service::award_suit(
        &h.state,
        &h.staff,
        player.player.id,
        AwardSuitRequest { suit: Suit::Club },
    )
    .await
    .unwrap();

    let winner_entries = h
        .store
        .activity
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.action == ActivityAction::FlushWinner)
        .count();
    assert_eq!(winner_entries, 1);
}

#[tokio::test]
async fn suit_award_outside_session_windows_is_rejected() {
    // 09:00 venue time falls in neither window.
    let h = harness_with_offset(offset_for_hour(9)).await;

    let player = auth_service::register_player(&h.state, register_request("Dana", "9155550100"))
        .await
        .unwrap();

    let err = flush_service::award_suit(
        &h.state,
        &h.staff,
        player.player.id,
        AwardSuitRequest {
            suit: poker_room_back::dao::models::Suit::Heart,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn registered_count_matches_successful_registrations() {
    let h = harness().await;

    let tournament = tournament_service::create(
        &h.state,
        &h.staff,
        CreateTournamentRequest {
            name: "Friday Deepstack".into(),
            date: "2026-08-07".into(),
            time: "7:00 PM".into(),
            buyin: Some("$20".into()),
            rebuy: None,
            addon: None,
            guarantee: Some("$3,000".into()),
            description: None,
        },
    )
    .await
    .unwrap();

    for phone in ["9155550201", "9155550202", "9155550203"] {
        tournament_service::register(
            &h.state,
            tournament.id,
            RegisterRequest {
                player_name: "Guest T".into(),
                phone: phone.into(),
                email: None,
                card_number: None,
            },
        )
        .await
        .unwrap();
    }

    // A duplicate phone is rejected and never counted.
    let err = tournament_service::register(
        &h.state,
        tournament.id,
        RegisterRequest {
            player_name: "Guest T".into(),
            phone: "9155550201".into(),
            email: None,
            card_number: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let detail = tournament_service::detail(&h.state, tournament.id)
        .await
        .unwrap();
    assert_eq!(detail.tournament.registered_count, 3);
    assert_eq!(detail.registrations.len(), 3);
}

#[tokio::test]
async fn leaderboard_rewrites_ranks_and_reports_cutoff() {
    let h = harness().await;

    let mut ids = Vec::new();
    for (index, phone) in ["9155550301", "9155550302", "9155550303"].iter().enumerate() {
        let player = auth_service::register_player(&h.state, register_request("Dana", phone))
            .await
            .unwrap();
        points_service::award(
            &h.state,
            &h.staff,
            AwardPointsRequest {
                player_id: player.player.id,
                points: (index as i64 + 1) * 10,
                reason: "promo".into(),
            },
        )
        .await
        .unwrap();
        ids.push(player.player.id);
    }

    let board = points_service::leaderboard(&h.state).await.unwrap();
    assert_eq!(board.leaderboard.len(), 3);
    assert_eq!(board.leaderboard[0].points, 30);
    assert_eq!(board.leaderboard[0].rank, 1);
    // Fewer than thirty players with points means no cutoff yet.
    assert_eq!(board.top30_cutoff, 0);

    // Ranks were written back to the player documents.
    let players = h.store.players.lock().unwrap();
    let top = players.iter().find(|p| p.id == ids[2]).unwrap();
    assert_eq!(top.rank, Some(1));
}

#[tokio::test]
async fn called_entries_past_expiry_are_listed_for_the_sweep() {
    let h = harness().await;

    let joined = waitlist_service::join(&h.state, join_request("Ann", "9155550001", "nlh-1-3"))
        .await
        .unwrap();
    waitlist_service::call(&h.state, &h.staff, joined.entry.id)
        .await
        .unwrap();

    // Nothing expires while the 30-minute window is open.
    let dyn_store: Arc<dyn RoomStore> = h.store.clone();
    let expired = dyn_store.list_expired_called(SystemTime::now()).await.unwrap();
    assert!(expired.is_empty());

    let expired = dyn_store
        .list_expired_called(SystemTime::now() + Duration::from_secs(31 * 60))
        .await
        .unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].player_name, "Ann");
}
