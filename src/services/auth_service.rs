//! Login and registration flows for guests and staff.

use tracing::info;

use crate::{
    auth,
    dao::models::{ActivityAction, ActivityEntity, PlayerEntity},
    dto::auth::{
        LoginMethod, PlayerAuthResponse, PlayerLoginRequest, PlayerRegisterRequest,
        StaffAuthResponse, StaffLoginRequest,
    },
    error::ServiceError,
    services::{rules, validate},
    state::SharedState,
};

/// Attempts allowed before a lockout, surfaced in the error message.
const LOCKOUT_MESSAGE: &str = "Too many failed attempts. Account temporarily locked.";
const BAD_PLAYER_CREDENTIALS: &str = "invalid card number or credentials";

/// How many times to re-roll a colliding card number before giving up.
const CARD_NUMBER_ATTEMPTS: usize = 100;

/// Authenticate a guest by card number plus PIN or phone-last-4.
pub async fn login_player(
    state: &SharedState,
    payload: PlayerLoginRequest,
) -> Result<PlayerAuthResponse, ServiceError> {
    let store = state.require_store().await?;
    let limiter_key = format!("player:{}", payload.card_number);

    if state.logins().is_blocked(&limiter_key) {
        return Err(ServiceError::RateLimited(LOCKOUT_MESSAGE.into()));
    }

    let Some(player) = store
        .find_player_by_card(payload.card_number.clone())
        .await?
    else {
        state.logins().record_attempt(&limiter_key, false);
        return Err(ServiceError::Unauthorized(BAD_PLAYER_CREDENTIALS.into()));
    };

    let valid = match payload.method {
        LoginMethod::Phone => player.phone_last4 == payload.credential,
        LoginMethod::Pin => auth::verify_secret(&payload.credential, &player.pin_hash),
    };

    if !valid {
        if state.logins().record_attempt(&limiter_key, false) {
            return Err(ServiceError::RateLimited(LOCKOUT_MESSAGE.into()));
        }
        return Err(ServiceError::Unauthorized(BAD_PLAYER_CREDENTIALS.into()));
    }

    state.logins().record_attempt(&limiter_key, true);

    let claims = auth::player_claims(&player, state.config().token_ttl);
    let token = auth::mint_token(&state.config().jwt_secret, &claims)?;

    let mut entry = ActivityEntity::new(ActivityAction::PlayerLogin);
    entry.player_id = Some(player.id);
    entry.player_name = Some(player.display_name());
    entry.details = Some("Player logged in".into());
    store.append_activity(entry).await?;

    Ok(PlayerAuthResponse {
        token,
        player: player.into(),
    })
}

/// Create a guest account, allocating a fresh card number.
pub async fn register_player(
    state: &SharedState,
    payload: PlayerRegisterRequest,
) -> Result<PlayerAuthResponse, ServiceError> {
    validate(&payload)?;
    let store = state.require_store().await?;

    if store
        .find_player_by_phone(payload.phone.clone())
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "phone number already registered".into(),
        ));
    }

    let mut card_number = rules::generate_card_number();
    let mut attempts = 0;
    while store
        .find_player_by_card(card_number.clone())
        .await?
        .is_some()
    {
        attempts += 1;
        if attempts >= CARD_NUMBER_ATTEMPTS {
            return Err(ServiceError::Conflict(
                "unable to allocate a card number".into(),
            ));
        }
        card_number = rules::generate_card_number();
    }

    let now = std::time::SystemTime::now();
    let phone_last4 = payload
        .phone
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    let phone_last4 = phone_last4
        .get(phone_last4.len().saturating_sub(4)..)
        .unwrap_or_default()
        .to_owned();

    let player = PlayerEntity {
        id: uuid::Uuid::new_v4(),
        card_number,
        first_name: payload.first_name,
        last_initial: payload.last_initial.to_uppercase(),
        phone: payload.phone,
        phone_last4,
        email: payload.email,
        pin_hash: auth::hash_secret(&payload.pin)?,
        points: 0,
        rank: None,
        created_at: now,
        updated_at: now,
    };

    store.insert_player(player.clone()).await?;
    info!(card_number = %player.card_number, "registered new player");

    let claims = auth::player_claims(&player, state.config().token_ttl);
    let token = auth::mint_token(&state.config().jwt_secret, &claims)?;

    let mut entry = ActivityEntity::new(ActivityAction::PlayerRegister);
    entry.player_id = Some(player.id);
    entry.player_name = Some(player.display_name());
    entry.details = Some("New player registered".into());
    store.append_activity(entry).await?;

    Ok(PlayerAuthResponse {
        token,
        player: player.into(),
    })
}

/// Authenticate an employee by username and password.
pub async fn login_staff(
    state: &SharedState,
    payload: StaffLoginRequest,
) -> Result<StaffAuthResponse, ServiceError> {
    let store = state.require_store().await?;
    let username = payload.username.to_lowercase();
    let limiter_key = format!("staff:{username}");

    if state.logins().is_blocked(&limiter_key) {
        return Err(ServiceError::RateLimited(LOCKOUT_MESSAGE.into()));
    }

    let staff = store.find_staff_by_username(username).await?;
    let valid = staff
        .as_ref()
        .is_some_and(|staff| auth::verify_secret(&payload.password, &staff.password_hash));

    let Some(staff) = staff.filter(|_| valid) else {
        if state.logins().record_attempt(&limiter_key, false) {
            return Err(ServiceError::RateLimited(LOCKOUT_MESSAGE.into()));
        }
        return Err(ServiceError::Unauthorized("invalid credentials".into()));
    };

    state.logins().record_attempt(&limiter_key, true);

    let claims = auth::staff_claims(&staff, state.config().token_ttl);
    let token = auth::mint_token(&state.config().jwt_secret, &claims)?;

    let mut entry = ActivityEntity::new(ActivityAction::StaffLogin);
    entry.staff_id = Some(staff.id);
    entry.staff_name = staff.name.clone();
    entry.details = Some("Staff logged in".into());
    store.append_activity(entry).await?;

    Ok(StaffAuthResponse {
        token,
        staff: staff.into(),
    })
}
