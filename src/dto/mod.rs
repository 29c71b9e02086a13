use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod activity;
pub mod auth;
pub mod common;
pub mod flush;
pub mod game;
pub mod health;
pub mod order;
pub mod player;
pub mod points;
pub mod public;
pub mod table;
pub mod tournament;
pub mod validation;
pub mod waitlist;

pub(crate) fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

pub(crate) fn format_optional_time(time: Option<SystemTime>) -> Option<String> {
    time.map(format_system_time)
}
