use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{PlayerEntity, StaffEntity, StaffRole},
    dto::validation::{validate_last_initial, validate_phone, validate_pin},
};

/// How a guest proves who they are at login.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    /// Card number plus PIN.
    #[default]
    Pin,
    /// Card number plus the last four digits of the phone on file.
    Phone,
}

/// Guest login payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlayerLoginRequest {
    pub card_number: String,
    /// PIN or phone-last-4, depending on `method`.
    pub credential: String,
    #[serde(default)]
    pub method: LoginMethod,
}

/// Guest sign-up payload.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PlayerRegisterRequest {
    #[validate(length(min = 1, max = 40))]
    pub first_name: String,
    #[validate(custom(function = validate_last_initial))]
    pub last_initial: String,
    #[validate(custom(function = validate_phone))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = validate_pin))]
    pub pin: String,
}

/// Employee login payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffLoginRequest {
    pub username: String,
    pub password: String,
}

/// Guest projection returned alongside a freshly minted token.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerProfile {
    pub id: Uuid,
    pub card_number: String,
    pub name: String,
    pub points: i64,
    pub rank: Option<u32>,
}

impl From<PlayerEntity> for PlayerProfile {
    fn from(player: PlayerEntity) -> Self {
        Self {
            id: player.id,
            card_number: player.card_number.clone(),
            name: player.display_name(),
            points: player.points,
            rank: player.rank,
        }
    }
}

/// Successful guest login/registration body.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerAuthResponse {
    pub token: String,
    pub player: PlayerProfile,
}

/// Employee projection returned alongside a freshly minted token.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffProfile {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub role: StaffRole,
}

impl From<StaffEntity> for StaffProfile {
    fn from(staff: StaffEntity) -> Self {
        Self {
            id: staff.id,
            username: staff.username,
            name: staff.name,
            role: staff.role,
        }
    }
}

/// Successful employee login body.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffAuthResponse {
    pub token: String,
    pub staff: StaffProfile,
}
