//! Domain entities shared between the storage layer and the services. Stored
//! documents convert to and from these in `dao::mongodb::models`.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Loyalty account for a venue guest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerEntity {
    /// Primary key.
    pub id: Uuid,
    /// Unique five-digit loyalty card number.
    pub card_number: String,
    pub first_name: String,
    /// Single uppercase initial; guests are displayed as "First X".
    pub last_initial: String,
    pub phone: String,
    /// Last four digits of `phone`, used for the phone login method.
    pub phone_last4: String,
    pub email: Option<String>,
    /// Argon2 hash of the login PIN.
    pub pin_hash: String,
    /// Current promotional point balance.
    pub points: i64,
    /// Leaderboard rank; rewritten on every leaderboard read.
    pub rank: Option<u32>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl PlayerEntity {
    /// Display name in the venue's "First X" convention.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_initial)
    }
}

/// Venue employee account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffEntity {
    pub id: Uuid,
    /// Unique lowercase login name.
    pub username: String,
    /// Argon2 hash of the password.
    pub password_hash: String,
    pub name: String,
    pub role: StaffRole,
    pub created_at: SystemTime,
}

/// Staff authorization level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Floor,
    Manager,
    Admin,
}

/// Fixed cash-game catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashGameEntity {
    pub id: Uuid,
    /// Stable short code used by waitlists and tables, e.g. `nlh-1-3`.
    pub game_code: String,
    pub name: String,
    pub stakes: String,
    pub min_buyin: u32,
    pub max_buyin: u32,
    pub is_active: bool,
}

/// Lifecycle status of a table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Open,
    Closed,
    Reserved,
}

/// A physical table on the floor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableEntity {
    pub id: Uuid,
    pub table_number: u32,
    /// Catalog entry the table is spread for, when known.
    pub game_id: Option<Uuid>,
    pub game_name: String,
    pub stakes: String,
    pub max_seats: u32,
    pub status: TableStatus,
    pub opened_at: Option<SystemTime>,
    pub closed_at: Option<SystemTime>,
    pub opened_by: Option<Uuid>,
}

/// An occupied seat. Vacant seats have no document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatEntity {
    pub id: Uuid,
    pub table_id: Uuid,
    pub table_number: u32,
    pub seat_number: u32,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub seated_at: SystemTime,
    pub seated_by: Option<Uuid>,
}

/// Queue state of a waitlist entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Waiting,
    Called,
    Seated,
    Removed,
}

impl WaitlistStatus {
    /// Whether the entry still holds a spot in the queue.
    pub fn is_active(self) -> bool {
        matches!(self, WaitlistStatus::Waiting | WaitlistStatus::Called)
    }
}

/// One party waiting for a seat in a specific game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistEntryEntity {
    pub id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub phone: String,
    pub card_number: Option<String>,
    /// Catalog code of the requested game.
    pub game_code: String,
    /// Monotonic queue rank within `game_code`.
    pub position: u32,
    pub num_players: u32,
    pub planned_buyin: u32,
    pub status: WaitlistStatus,
    pub joined_at: SystemTime,
    pub called_at: Option<SystemTime>,
    pub called_by: Option<Uuid>,
    /// Deadline to claim a seat once called.
    pub expires_at: Option<SystemTime>,
    pub seated_at: Option<SystemTime>,
    pub removed_at: Option<SystemTime>,
}

/// Scheduled tournament event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TournamentEntity {
    pub id: Uuid,
    pub name: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Display time, e.g. `7:00 PM`.
    pub time: String,
    pub buyin: Option<String>,
    pub rebuy: Option<String>,
    pub addon: Option<String>,
    pub guarantee: Option<String>,
    pub description: Option<String>,
    /// Incrementing sign-up counter; never reconciled against registrations.
    pub registered_count: u32,
    pub is_active: bool,
    pub created_at: SystemTime,
}

/// Progress of one registrant through a tournament.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    CheckedIn,
    Eliminated,
    Cashed,
}

/// A player's sign-up for a tournament; unique by (tournament, phone).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub card_number: Option<String>,
    /// Human-facing confirmation code.
    pub confirmation: String,
    pub status: RegistrationStatus,
    pub finish_position: Option<u32>,
    pub registered_at: SystemTime,
    pub registered_by: Option<Uuid>,
}

/// One of the two daily flush promotion windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlushSession {
    FlushShine,
    LastCall,
}

impl FlushSession {
    /// Stable wire/storage identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            FlushSession::FlushShine => "flush_shine",
            FlushSession::LastCall => "last_call",
        }
    }
}

/// Card suit in the flush promotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    /// Single-letter abbreviation used on displays.
    pub fn letter(self) -> &'static str {
        match self {
            Suit::Spade => "S",
            Suit::Heart => "H",
            Suit::Diamond => "D",
            Suit::Club => "C",
        }
    }
}

/// Suit collection state for one player in one session window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlushProgressEntity {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub card_number: Option<String>,
    pub session: FlushSession,
    /// Venue-local calendar date the progress belongs to, `YYYY-MM-DD`.
    pub session_date: String,
    pub spade: bool,
    pub heart: bool,
    pub diamond: bool,
    pub club: bool,
    /// Set exactly once, when the fourth suit lands.
    pub completed_at: Option<SystemTime>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

impl FlushProgressEntity {
    /// Suits collected so far, in display order.
    pub fn suits(&self) -> Vec<Suit> {
        let mut suits = Vec::new();
        if self.spade {
            suits.push(Suit::Spade);
        }
        if self.heart {
            suits.push(Suit::Heart);
        }
        if self.diamond {
            suits.push(Suit::Diamond);
        }
        if self.club {
            suits.push(Suit::Club);
        }
        suits
    }

    /// Whether all four suits have been collected.
    pub fn is_complete(&self) -> bool {
        self.spade && self.heart && self.diamond && self.club
    }

    /// Mark one suit as collected.
    pub fn set_suit(&mut self, suit: Suit) {
        match suit {
            Suit::Spade => self.spade = true,
            Suit::Heart => self.heart = true,
            Suit::Diamond => self.diamond = true,
            Suit::Club => self.club = true,
        }
    }
}

/// Running jackpot for one session window; exactly one document per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlushJackpotEntity {
    pub id: Uuid,
    pub session: FlushSession,
    pub name: String,
    /// Display label for the window, e.g. `2PM-8PM`.
    pub hours: String,
    pub amount: i64,
    /// Amount the jackpot resets to after a win.
    pub base_amount: i64,
    /// Added once per day by housekeeping.
    pub daily_increment: i64,
    pub last_won_date: Option<SystemTime>,
    pub last_winner: Option<Uuid>,
}

/// Kitchen workflow state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Delivered,
    Cancelled,
}

/// Line item on a food order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemEntity {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Table-scoped food order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodOrderEntity {
    pub id: Uuid,
    /// Sequential human-facing number, e.g. `#1042`.
    pub order_number: String,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<u32>,
    pub seat_number: Option<u32>,
    pub items: Vec<OrderItemEntity>,
    pub status: OrderStatus,
    pub created_at: SystemTime,
    pub started_at: Option<SystemTime>,
    pub completed_at: Option<SystemTime>,
    pub cancelled_at: Option<SystemTime>,
    pub handled_by: Option<Uuid>,
}

/// One floor session for a player, closed by checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckinEntity {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub checked_in_at: SystemTime,
    pub checked_out_at: Option<SystemTime>,
    pub total_minutes: Option<u32>,
    pub hours_played: Option<f64>,
    pub points_awarded: Option<i64>,
    pub checked_in_by: Option<Uuid>,
    pub checked_out_by: Option<Uuid>,
}

/// Category of a points ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PointsKind {
    TournamentPlay,
    TournamentPlace,
    CashHourly,
    CashDaily,
    Bonus,
    Adjustment,
}

/// Append-only record of a point award or adjustment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointsTransactionEntity {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: Option<String>,
    pub points: i64,
    pub kind: PointsKind,
    pub description: Option<String>,
    pub awarded_by: Option<Uuid>,
    pub created_at: SystemTime,
}

/// Audited action kinds. The set mirrors everything the venue wants on the
/// activity board, including promo events logged by other subsystems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Seated,
    Called,
    Removed,
    CheckIn,
    CheckOut,
    Points,
    FlushSpade,
    FlushHeart,
    FlushDiamond,
    FlushClub,
    FlushWinner,
    FlushReset,
    HighHand,
    SplashPot,
    OrderStart,
    OrderDone,
    TableOpen,
    TableClose,
    TournamentRegister,
    WaitlistJoin,
    PlayerLogin,
    PlayerRegister,
    StaffLogin,
}

impl ActivityAction {
    /// Activity action for awarding a particular suit.
    pub fn for_suit(suit: Suit) -> Self {
        match suit {
            Suit::Spade => ActivityAction::FlushSpade,
            Suit::Heart => ActivityAction::FlushHeart,
            Suit::Diamond => ActivityAction::FlushDiamond,
            Suit::Club => ActivityAction::FlushClub,
        }
    }

    /// Stable wire/storage identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Seated => "seated",
            ActivityAction::Called => "called",
            ActivityAction::Removed => "removed",
            ActivityAction::CheckIn => "check_in",
            ActivityAction::CheckOut => "check_out",
            ActivityAction::Points => "points",
            ActivityAction::FlushSpade => "flush_spade",
            ActivityAction::FlushHeart => "flush_heart",
            ActivityAction::FlushDiamond => "flush_diamond",
            ActivityAction::FlushClub => "flush_club",
            ActivityAction::FlushWinner => "flush_winner",
            ActivityAction::FlushReset => "flush_reset",
            ActivityAction::HighHand => "high_hand",
            ActivityAction::SplashPot => "splash_pot",
            ActivityAction::OrderStart => "order_start",
            ActivityAction::OrderDone => "order_done",
            ActivityAction::TableOpen => "table_open",
            ActivityAction::TableClose => "table_close",
            ActivityAction::TournamentRegister => "tournament_register",
            ActivityAction::WaitlistJoin => "waitlist_join",
            ActivityAction::PlayerLogin => "player_login",
            ActivityAction::PlayerRegister => "player_register",
            ActivityAction::StaffLogin => "staff_login",
        }
    }
}

/// Append-only audit trail entry; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntity {
    pub id: Uuid,
    pub action: ActivityAction,
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub staff_id: Option<Uuid>,
    /// Defaults to `System` for entries not tied to a staff member.
    pub staff_name: String,
    pub table_number: Option<u32>,
    pub details: Option<String>,
    pub created_at: SystemTime,
}

/// Query filter for reading the activity log.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    pub action: Option<ActivityAction>,
    pub staff_name: Option<String>,
    pub limit: i64,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            action: None,
            staff_name: None,
            limit: 50,
        }
    }
}

impl ActivityEntity {
    /// Start a minimal entry; callers fill in the optional references.
    pub fn new(action: ActivityAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            player_id: None,
            player_name: None,
            staff_id: None,
            staff_name: "System".to_owned(),
            table_number: None,
            details: None,
            created_at: SystemTime::now(),
        }
    }
}
