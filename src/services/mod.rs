//! Business logic powering the REST routes: one module per resource, plus
//! the background housekeeping loop and the outbound email collaborator.

pub mod activity_service;
pub mod auth_service;
pub mod bootstrap;
pub mod documentation;
pub mod flush_service;
pub mod game_service;
pub mod health_service;
pub mod housekeeping;
pub mod notifier;
pub mod order_service;
pub mod player_service;
pub mod points_service;
pub mod public_service;
pub mod rules;
pub mod table_service;
pub mod tournament_service;
pub mod waitlist_service;

use validator::Validate;

use crate::error::ServiceError;

/// Run derive-based validation, folding failures into the service error type.
fn validate(payload: &impl Validate) -> Result<(), ServiceError> {
    payload
        .validate()
        .map_err(|err| ServiceError::InvalidInput(format!("validation failed: {err}")))
}
