//! Application-level configuration loading: token signing, venue clock and
//! the optional outbound email collaborator.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "POKER_ROOM_CONFIG_PATH";
/// Fallback signing secret for development setups without `JWT_SECRET`.
const DEV_JWT_SECRET: &str = "poker-room-dev-secret";
/// Default bearer token lifetime.
const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// Offset of the venue wall clock from UTC, in whole hours. Flush
    /// session windows are evaluated against this clock.
    pub venue_utc_offset_hours: i8,
    /// Outbound email collaborator; notifications are skipped when absent.
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone, Deserialize)]
/// Transactional-email API settings.
pub struct EmailConfig {
    /// Endpoint of the provider's send API.
    pub api_url: String,
    /// Bearer key for the provider.
    pub api_key: String,
    /// Sender address.
    pub from: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults, then apply environment overrides.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration file");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Ok(secret) = env::var("JWT_SECRET") {
            if !secret.is_empty() {
                config.jwt_secret = secret;
            }
        }

        if config.jwt_secret == DEV_JWT_SECRET {
            warn!("running with the built-in development JWT secret");
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_owned(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS * 3600),
            venue_utc_offset_hours: 0,
            email: None,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    venue_utc_offset_hours: Option<i8>,
    email: Option<EmailConfig>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            jwt_secret: value.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl: value
                .token_ttl_hours
                .map(|hours| Duration::from_secs(hours * 3600))
                .unwrap_or(defaults.token_ttl),
            venue_utc_offset_hours: value
                .venue_utc_offset_hours
                .unwrap_or(defaults.venue_utc_offset_hours),
            email: value.email,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
