//! Tournament scheduling and registration.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    auth::Claims,
    dao::models::{
        ActivityAction, ActivityEntity, RegistrationEntity, RegistrationStatus, TournamentEntity,
    },
    dto::tournament::{
        CreateTournamentRequest, RegisterRequest, RegisterResponse, TournamentDetailResponse,
        TournamentSummary,
    },
    error::ServiceError,
    services::{rules, validate},
    state::SharedState,
};

/// Active events.
pub async fn list(state: &SharedState) -> Result<Vec<TournamentSummary>, ServiceError> {
    let store = state.require_store().await?;
    let tournaments = store.list_active_tournaments().await?;
    Ok(tournaments.into_iter().map(Into::into).collect())
}

/// One event with its registrations.
pub async fn detail(
    state: &SharedState,
    id: Uuid,
) -> Result<TournamentDetailResponse, ServiceError> {
    let store = state.require_store().await?;
    let tournament = store
        .find_tournament(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;
    let registrations = store.list_registrations(id).await?;

    Ok(TournamentDetailResponse {
        tournament: tournament.into(),
        registrations: registrations.into_iter().map(Into::into).collect(),
    })
}

/// Schedule an event.
pub async fn create(
    state: &SharedState,
    staff: &Claims,
    payload: CreateTournamentRequest,
) -> Result<TournamentSummary, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    let tournament = TournamentEntity {
        id: Uuid::new_v4(),
        name: payload.name,
        date: payload.date,
        time: payload.time,
        buyin: payload.buyin,
        rebuy: payload.rebuy,
        addon: payload.addon,
        guarantee: payload.guarantee,
        description: payload.description,
        registered_count: 0,
        is_active: true,
        created_at: SystemTime::now(),
    };
    store.insert_tournament(tournament.clone()).await?;

    let mut log = ActivityEntity::new(ActivityAction::TournamentRegister);
    log.staff_id = Some(staff.sub);
    log.staff_name = staff.name.clone();
    log.details = Some(format!("Created tournament: {}", tournament.name));
    store.append_activity(log).await?;

    Ok(tournament.into())
}

/// Register a player; one sign-up per phone number per event.
pub async fn register(
    state: &SharedState,
    id: Uuid,
    payload: RegisterRequest,
) -> Result<RegisterResponse, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    let tournament = store
        .find_tournament(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("tournament not found".into()))?;

    if store
        .find_registration_by_phone(tournament.id, payload.phone.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "already registered for this tournament".into(),
        ));
    }

    let year = rules::venue_now(state.config().venue_utc_offset_hours).year();
    let registration = RegistrationEntity {
        id: Uuid::new_v4(),
        tournament_id: tournament.id,
        player_id: None,
        player_name: payload.player_name,
        phone: payload.phone,
        email: payload.email,
        card_number: payload.card_number,
        confirmation: rules::generate_confirmation(year),
        status: RegistrationStatus::Registered,
        finish_position: None,
        registered_at: SystemTime::now(),
        registered_by: None,
    };
    store.insert_registration(registration.clone()).await?;
    store.increment_registered_count(tournament.id).await?;

    let mut log = ActivityEntity::new(ActivityAction::TournamentRegister);
    log.player_name = Some(registration.player_name.clone());
    log.details = Some(format!("Registered for {}", tournament.name));
    store.append_activity(log).await?;

    Ok(RegisterResponse {
        message: "Registered successfully".into(),
        registration: registration.into(),
    })
}
