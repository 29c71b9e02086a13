//! Bearer-token authentication: HS256 claims minting/verification, Argon2
//! credential hashing and the router middlewares gating staff endpoints.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    dao::models::{PlayerEntity, StaffEntity, StaffRole},
    error::{AppError, ServiceError},
    state::SharedState,
};

/// Whether a token belongs to a guest or an employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Player,
    Staff,
}

/// Verified bearer-token payload, inserted into request extensions by the
/// auth middlewares.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Claims {
    /// Subject id (player or staff).
    pub sub: Uuid,
    /// Display name for activity-log attribution.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

fn epoch_seconds(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Claims for a guest token.
pub fn player_claims(player: &PlayerEntity, ttl: Duration) -> Claims {
    let now = SystemTime::now();
    Claims {
        sub: player.id,
        name: player.display_name(),
        kind: TokenKind::Player,
        role: None,
        card_number: Some(player.card_number.clone()),
        username: None,
        iat: epoch_seconds(now),
        exp: epoch_seconds(now + ttl),
    }
}

/// Claims for an employee token.
pub fn staff_claims(staff: &StaffEntity, ttl: Duration) -> Claims {
    let now = SystemTime::now();
    Claims {
        sub: staff.id,
        name: staff.name.clone(),
        kind: TokenKind::Staff,
        role: Some(staff.role),
        card_number: None,
        username: Some(staff.username.clone()),
        iat: epoch_seconds(now),
        exp: epoch_seconds(now + ttl),
    }
}

/// Sign claims into a compact HS256 token.
pub fn mint_token(secret: &str, claims: &Claims) -> Result<String, ServiceError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ServiceError::Unauthorized(format!("failed to sign token: {err}")))
}

/// Verify a compact token and return its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServiceError::Unauthorized("invalid token".into()))
}

/// Hash a PIN or password for storage.
pub fn hash_secret(secret: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::InvalidInput(format!("failed to hash credential: {err}")))
}

/// Constant-time credential check against a stored hash.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn claims_from_request(state: &SharedState, req: &Request<Body>) -> Result<Claims, AppError> {
    let token = bearer_token(req)
        .ok_or_else(|| AppError::Unauthorized("authentication required".into()))?;
    verify_token(&state.config().jwt_secret, token).map_err(Into::into)
}

/// Require any valid token (player or staff).
pub async fn require_auth(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = claims_from_request(&state, &req)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Require a staff token of any role.
pub async fn require_staff(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = claims_from_request(&state, &req)?;
    if claims.kind != TokenKind::Staff {
        return Err(AppError::Forbidden("staff access required".into()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Require a staff token carrying the admin role.
pub async fn require_admin(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = claims_from_request(&state, &req)?;
    if claims.kind != TokenKind::Staff || claims.role != Some(StaffRole::Admin) {
        return Err(AppError::Forbidden("admin access required".into()));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_staff(role: StaffRole) -> StaffEntity {
        StaffEntity {
            id: Uuid::new_v4(),
            username: "maria".into(),
            password_hash: String::new(),
            name: "Maria G".into(),
            role,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let staff = sample_staff(StaffRole::Manager);
        let claims = staff_claims(&staff, Duration::from_secs(3600));
        let token = mint_token("secret", &claims).unwrap();
        let verified = verify_token("secret", &token).unwrap();
        assert_eq!(verified.sub, staff.id);
        assert_eq!(verified.kind, TokenKind::Staff);
        assert_eq!(verified.role, Some(StaffRole::Manager));
        assert_eq!(verified.username.as_deref(), Some("maria"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let staff = sample_staff(StaffRole::Floor);
        let claims = staff_claims(&staff, Duration::from_secs(3600));
        let token = mint_token("secret", &claims).unwrap();
        assert!(verify_token("other", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let staff = sample_staff(StaffRole::Floor);
        let mut claims = staff_claims(&staff, Duration::from_secs(3600));
        // Push expiry well past the default validation leeway.
        claims.exp = epoch_seconds(SystemTime::now()) - 300;
        let token = mint_token("secret", &claims).unwrap();
        assert!(verify_token("secret", &token).is_err());
    }

    #[test]
    fn credential_hash_verifies() {
        let hash = hash_secret("1234").unwrap();
        assert!(verify_secret("1234", &hash));
        assert!(!verify_secret("4321", &hash));
        assert!(!verify_secret("1234", "not-a-hash"));
    }
}
