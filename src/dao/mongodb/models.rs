//! Stored document types. Entities carry `SystemTime`; documents carry BSON
//! `DateTime` so range queries and sorts work server-side. Entities without
//! timestamps (the cash-game catalog) are stored directly.

use std::time::SystemTime;

use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    ActivityAction, ActivityEntity, CheckinEntity, FlushJackpotEntity, FlushProgressEntity,
    FlushSession, FoodOrderEntity, OrderItemEntity, OrderStatus, PlayerEntity, PointsKind,
    PointsTransactionEntity, RegistrationEntity, RegistrationStatus, SeatEntity, StaffEntity,
    StaffRole, TableEntity, TableStatus, TournamentEntity, WaitlistEntryEntity, WaitlistStatus,
};

pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}

pub fn ts(value: SystemTime) -> DateTime {
    DateTime::from_system_time(value)
}

pub fn opt_ts(value: Option<SystemTime>) -> Option<DateTime> {
    value.map(DateTime::from_system_time)
}

fn sys(value: DateTime) -> SystemTime {
    value.to_system_time()
}

fn opt_sys(value: Option<DateTime>) -> Option<SystemTime> {
    value.map(DateTime::to_system_time)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub card_number: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub phone_last4: String,
    pub email: Option<String>,
    pub pin_hash: String,
    pub points: i64,
    pub rank: Option<u32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<PlayerEntity> for PlayerDocument {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            card_number: value.card_number,
            first_name: value.first_name,
            last_initial: value.last_initial,
            phone: value.phone,
            phone_last4: value.phone_last4,
            email: value.email,
            pin_hash: value.pin_hash,
            points: value.points,
            rank: value.rank,
            created_at: ts(value.created_at),
            updated_at: ts(value.updated_at),
        }
    }
}

impl From<PlayerDocument> for PlayerEntity {
    fn from(value: PlayerDocument) -> Self {
        Self {
            id: value.id,
            card_number: value.card_number,
            first_name: value.first_name,
            last_initial: value.last_initial,
            phone: value.phone,
            phone_last4: value.phone_last4,
            email: value.email,
            pin_hash: value.pin_hash,
            points: value.points,
            rank: value.rank,
            created_at: sys(value.created_at),
            updated_at: sys(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: StaffRole,
    pub created_at: DateTime,
}

impl From<StaffEntity> for StaffDocument {
    fn from(value: StaffEntity) -> Self {
        Self {
            id: value.id,
            username: value.username,
            password_hash: value.password_hash,
            name: value.name,
            role: value.role,
            created_at: ts(value.created_at),
        }
    }
}

impl From<StaffDocument> for StaffEntity {
    fn from(value: StaffDocument) -> Self {
        Self {
            id: value.id,
            username: value.username,
            password_hash: value.password_hash,
            name: value.name,
            role: value.role,
            created_at: sys(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub table_number: u32,
    pub game_id: Option<Uuid>,
    pub game_name: String,
    pub stakes: String,
    pub max_seats: u32,
    pub status: TableStatus,
    pub opened_at: Option<DateTime>,
    pub closed_at: Option<DateTime>,
    pub opened_by: Option<Uuid>,
}

impl From<TableEntity> for TableDocument {
    fn from(value: TableEntity) -> Self {
        Self {
            id: value.id,
            table_number: value.table_number,
            game_id: value.game_id,
            game_name: value.game_name,
            stakes: value.stakes,
            max_seats: value.max_seats,
            status: value.status,
            opened_at: opt_ts(value.opened_at),
            closed_at: opt_ts(value.closed_at),
            opened_by: value.opened_by,
        }
    }
}

impl From<TableDocument> for TableEntity {
    fn from(value: TableDocument) -> Self {
        Self {
            id: value.id,
            table_number: value.table_number,
            game_id: value.game_id,
            game_name: value.game_name,
            stakes: value.stakes,
            max_seats: value.max_seats,
            status: value.status,
            opened_at: opt_sys(value.opened_at),
            closed_at: opt_sys(value.closed_at),
            opened_by: value.opened_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub table_id: Uuid,
    pub table_number: u32,
    pub seat_number: u32,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub seated_at: DateTime,
    pub seated_by: Option<Uuid>,
}

impl From<SeatEntity> for SeatDocument {
    fn from(value: SeatEntity) -> Self {
        Self {
            id: value.id,
            table_id: value.table_id,
            table_number: value.table_number,
            seat_number: value.seat_number,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            seated_at: ts(value.seated_at),
            seated_by: value.seated_by,
        }
    }
}

impl From<SeatDocument> for SeatEntity {
    fn from(value: SeatDocument) -> Self {
        Self {
            id: value.id,
            table_id: value.table_id,
            table_number: value.table_number,
            seat_number: value.seat_number,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            seated_at: sys(value.seated_at),
            seated_by: value.seated_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntryDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub phone: String,
    pub card_number: Option<String>,
    pub game_code: String,
    pub position: u32,
    pub num_players: u32,
    pub planned_buyin: u32,
    pub status: WaitlistStatus,
    pub joined_at: DateTime,
    pub called_at: Option<DateTime>,
    pub called_by: Option<Uuid>,
    pub expires_at: Option<DateTime>,
    pub seated_at: Option<DateTime>,
    pub removed_at: Option<DateTime>,
}

impl From<WaitlistEntryEntity> for WaitlistEntryDocument {
    fn from(value: WaitlistEntryEntity) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            phone: value.phone,
            card_number: value.card_number,
            game_code: value.game_code,
            position: value.position,
            num_players: value.num_players,
            planned_buyin: value.planned_buyin,
            status: value.status,
            joined_at: ts(value.joined_at),
            called_at: opt_ts(value.called_at),
            called_by: value.called_by,
            expires_at: opt_ts(value.expires_at),
            seated_at: opt_ts(value.seated_at),
            removed_at: opt_ts(value.removed_at),
        }
    }
}

impl From<WaitlistEntryDocument> for WaitlistEntryEntity {
    fn from(value: WaitlistEntryDocument) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            phone: value.phone,
            card_number: value.card_number,
            game_code: value.game_code,
            position: value.position,
            num_players: value.num_players,
            planned_buyin: value.planned_buyin,
            status: value.status,
            joined_at: sys(value.joined_at),
            called_at: opt_sys(value.called_at),
            called_by: value.called_by,
            expires_at: opt_sys(value.expires_at),
            seated_at: opt_sys(value.seated_at),
            removed_at: opt_sys(value.removed_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub date: String,
    pub time: String,
    pub buyin: Option<String>,
    pub rebuy: Option<String>,
    pub addon: Option<String>,
    pub guarantee: Option<String>,
    pub description: Option<String>,
    pub registered_count: u32,
    pub is_active: bool,
    pub created_at: DateTime,
}

impl From<TournamentEntity> for TournamentDocument {
    fn from(value: TournamentEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            time: value.time,
            buyin: value.buyin,
            rebuy: value.rebuy,
            addon: value.addon,
            guarantee: value.guarantee,
            description: value.description,
            registered_count: value.registered_count,
            is_active: value.is_active,
            created_at: ts(value.created_at),
        }
    }
}

impl From<TournamentDocument> for TournamentEntity {
    fn from(value: TournamentDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            time: value.time,
            buyin: value.buyin,
            rebuy: value.rebuy,
            addon: value.addon,
            guarantee: value.guarantee,
            description: value.description,
            registered_count: value.registered_count,
            is_active: value.is_active,
            created_at: sys(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub card_number: Option<String>,
    pub confirmation: String,
    pub status: RegistrationStatus,
    pub finish_position: Option<u32>,
    pub registered_at: DateTime,
    pub registered_by: Option<Uuid>,
}

impl From<RegistrationEntity> for RegistrationDocument {
    fn from(value: RegistrationEntity) -> Self {
        Self {
            id: value.id,
            tournament_id: value.tournament_id,
            player_id: value.player_id,
            player_name: value.player_name,
            phone: value.phone,
            email: value.email,
            card_number: value.card_number,
            confirmation: value.confirmation,
            status: value.status,
            finish_position: value.finish_position,
            registered_at: ts(value.registered_at),
            registered_by: value.registered_by,
        }
    }
}

impl From<RegistrationDocument> for RegistrationEntity {
    fn from(value: RegistrationDocument) -> Self {
        Self {
            id: value.id,
            tournament_id: value.tournament_id,
            player_id: value.player_id,
            player_name: value.player_name,
            phone: value.phone,
            email: value.email,
            card_number: value.card_number,
            confirmation: value.confirmation,
            status: value.status,
            finish_position: value.finish_position,
            registered_at: sys(value.registered_at),
            registered_by: value.registered_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlushProgressDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub card_number: Option<String>,
    pub session: FlushSession,
    pub session_date: String,
    pub spade: bool,
    pub heart: bool,
    pub diamond: bool,
    pub club: bool,
    pub completed_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<FlushProgressEntity> for FlushProgressDocument {
    fn from(value: FlushProgressEntity) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            session: value.session,
            session_date: value.session_date,
            spade: value.spade,
            heart: value.heart,
            diamond: value.diamond,
            club: value.club,
            completed_at: opt_ts(value.completed_at),
            created_at: ts(value.created_at),
            updated_at: ts(value.updated_at),
        }
    }
}

impl From<FlushProgressDocument> for FlushProgressEntity {
    fn from(value: FlushProgressDocument) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            session: value.session,
            session_date: value.session_date,
            spade: value.spade,
            heart: value.heart,
            diamond: value.diamond,
            club: value.club,
            completed_at: opt_sys(value.completed_at),
            created_at: sys(value.created_at),
            updated_at: sys(value.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlushJackpotDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub session: FlushSession,
    pub name: String,
    pub hours: String,
    pub amount: i64,
    pub base_amount: i64,
    pub daily_increment: i64,
    pub last_won_date: Option<DateTime>,
    pub last_winner: Option<Uuid>,
}

impl From<FlushJackpotEntity> for FlushJackpotDocument {
    fn from(value: FlushJackpotEntity) -> Self {
        Self {
            id: value.id,
            session: value.session,
            name: value.name,
            hours: value.hours,
            amount: value.amount,
            base_amount: value.base_amount,
            daily_increment: value.daily_increment,
            last_won_date: opt_ts(value.last_won_date),
            last_winner: value.last_winner,
        }
    }
}

impl From<FlushJackpotDocument> for FlushJackpotEntity {
    fn from(value: FlushJackpotDocument) -> Self {
        Self {
            id: value.id,
            session: value.session,
            name: value.name,
            hours: value.hours,
            amount: value.amount,
            base_amount: value.base_amount,
            daily_increment: value.daily_increment,
            last_won_date: opt_sys(value.last_won_date),
            last_winner: value.last_winner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub order_number: String,
    pub player_id: Option<Uuid>,
    pub player_name: String,
    pub card_number: Option<String>,
    pub table_number: Option<u32>,
    pub seat_number: Option<u32>,
    pub items: Vec<OrderItemEntity>,
    pub status: OrderStatus,
    pub created_at: DateTime,
    pub started_at: Option<DateTime>,
    pub completed_at: Option<DateTime>,
    pub cancelled_at: Option<DateTime>,
    pub handled_by: Option<Uuid>,
}

impl From<FoodOrderEntity> for FoodOrderDocument {
    fn from(value: FoodOrderEntity) -> Self {
        Self {
            id: value.id,
            order_number: value.order_number,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            table_number: value.table_number,
            seat_number: value.seat_number,
            items: value.items,
            status: value.status,
            created_at: ts(value.created_at),
            started_at: opt_ts(value.started_at),
            completed_at: opt_ts(value.completed_at),
            cancelled_at: opt_ts(value.cancelled_at),
            handled_by: value.handled_by,
        }
    }
}

impl From<FoodOrderDocument> for FoodOrderEntity {
    fn from(value: FoodOrderDocument) -> Self {
        Self {
            id: value.id,
            order_number: value.order_number,
            player_id: value.player_id,
            player_name: value.player_name,
            card_number: value.card_number,
            table_number: value.table_number,
            seat_number: value.seat_number,
            items: value.items,
            status: value.status,
            created_at: sys(value.created_at),
            started_at: opt_sys(value.started_at),
            completed_at: opt_sys(value.completed_at),
            cancelled_at: opt_sys(value.cancelled_at),
            handled_by: value.handled_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub checked_in_at: DateTime,
    pub checked_out_at: Option<DateTime>,
    pub total_minutes: Option<u32>,
    pub hours_played: Option<f64>,
    pub points_awarded: Option<i64>,
    pub checked_in_by: Option<Uuid>,
    pub checked_out_by: Option<Uuid>,
}

impl From<CheckinEntity> for CheckinDocument {
    fn from(value: CheckinEntity) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            checked_in_at: ts(value.checked_in_at),
            checked_out_at: opt_ts(value.checked_out_at),
            total_minutes: value.total_minutes,
            hours_played: value.hours_played,
            points_awarded: value.points_awarded,
            checked_in_by: value.checked_in_by,
            checked_out_by: value.checked_out_by,
        }
    }
}

impl From<CheckinDocument> for CheckinEntity {
    fn from(value: CheckinDocument) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            checked_in_at: sys(value.checked_in_at),
            checked_out_at: opt_sys(value.checked_out_at),
            total_minutes: value.total_minutes,
            hours_played: value.hours_played,
            points_awarded: value.points_awarded,
            checked_in_by: value.checked_in_by,
            checked_out_by: value.checked_out_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsTransactionDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: Option<String>,
    pub points: i64,
    pub kind: PointsKind,
    pub description: Option<String>,
    pub awarded_by: Option<Uuid>,
    pub created_at: DateTime,
}

impl From<PointsTransactionEntity> for PointsTransactionDocument {
    fn from(value: PointsTransactionEntity) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            points: value.points,
            kind: value.kind,
            description: value.description,
            awarded_by: value.awarded_by,
            created_at: ts(value.created_at),
        }
    }
}

impl From<PointsTransactionDocument> for PointsTransactionEntity {
    fn from(value: PointsTransactionDocument) -> Self {
        Self {
            id: value.id,
            player_id: value.player_id,
            player_name: value.player_name,
            points: value.points,
            kind: value.kind,
            description: value.description,
            awarded_by: value.awarded_by,
            created_at: sys(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDocument {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub action: ActivityAction,
    pub player_id: Option<Uuid>,
    pub player_name: Option<String>,
    pub staff_id: Option<Uuid>,
    pub staff_name: String,
    pub table_number: Option<u32>,
    pub details: Option<String>,
    pub created_at: DateTime,
}

impl From<ActivityEntity> for ActivityDocument {
    fn from(value: ActivityEntity) -> Self {
        Self {
            id: value.id,
            action: value.action,
            player_id: value.player_id,
            player_name: value.player_name,
            staff_id: value.staff_id,
            staff_name: value.staff_name,
            table_number: value.table_number,
            details: value.details,
            created_at: ts(value.created_at),
        }
    }
}

impl From<ActivityDocument> for ActivityEntity {
    fn from(value: ActivityDocument) -> Self {
        Self {
            id: value.id,
            action: value.action,
            player_id: value.player_id,
            player_name: value.player_name,
            staff_id: value.staff_id,
            staff_name: value.staff_name,
            table_number: value.table_number,
            details: value.details,
            created_at: sys(value.created_at),
        }
    }
}
