use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{RegistrationEntity, RegistrationStatus, TournamentEntity},
    dto::{format_system_time, validation::validate_phone},
};

/// Staff payload to schedule an event.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Display time, e.g. `7:00 PM`.
    pub time: String,
    pub buyin: Option<String>,
    pub rebuy: Option<String>,
    pub addon: Option<String>,
    pub guarantee: Option<String>,
    pub description: Option<String>,
}

/// Event projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentSummary {
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
    pub created_at: String,
}

impl From<TournamentEntity> for TournamentSummary {
    fn from(tournament: TournamentEntity) -> Self {
        Self {
            id: tournament.id,
            name: tournament.name,
            date: tournament.date,
            time: tournament.time,
            buyin: tournament.buyin,
            rebuy: tournament.rebuy,
            addon: tournament.addon,
            guarantee: tournament.guarantee,
            description: tournament.description,
            registered_count: tournament.registered_count,
            is_active: tournament.is_active,
            created_at: format_system_time(tournament.created_at),
        }
    }
}

/// Event plus its registrations.
#[derive(Debug, Serialize, ToSchema)]
pub struct TournamentDetailResponse {
    #[serde(flatten)]
    pub tournament: TournamentSummary,
    pub registrations: Vec<RegistrationSummary>,
}

/// Sign-up payload; open to walk-ups without an account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 60))]
    pub player_name: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub card_number: Option<String>,
}

/// Registration projection.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub player_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub card_number: Option<String>,
    pub confirmation: String,
    pub status: RegistrationStatus,
    pub registered_at: String,
}

impl From<RegistrationEntity> for RegistrationSummary {
    fn from(registration: RegistrationEntity) -> Self {
        Self {
            id: registration.id,
            tournament_id: registration.tournament_id,
            player_name: registration.player_name,
            phone: registration.phone,
            email: registration.email,
            card_number: registration.card_number,
            confirmation: registration.confirmation,
            status: registration.status,
            registered_at: format_system_time(registration.registered_at),
        }
    }
}

/// Body returned after a successful sign-up.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub registration: RegistrationSummary,
}
