//! House rules: the point award table, flush session windows and the
//! card-number / confirmation-code generators.

use rand::Rng;
use time::{OffsetDateTime, UtcOffset};

use crate::dao::models::FlushSession;

/// Cash session of one to five hours.
pub const CASH_HOURLY_POINTS: i64 = 10;
/// Cash session of six hours or more.
pub const CASH_DAILY_POINTS: i64 = 30;

/// Prefix on tournament confirmation codes.
const CONFIRMATION_PREFIX: &str = "SR";

/// Points for a cash session of the given length.
pub fn cash_points(hours: f64) -> i64 {
    if hours >= 6.0 {
        CASH_DAILY_POINTS
    } else if hours >= 1.0 {
        CASH_HOURLY_POINTS
    } else {
        0
    }
}

/// The flush session covering a venue wall-clock hour, if any. Flush & Shine
/// runs 2PM-8PM, Last Call 8PM-2AM.
pub fn session_for_hour(hour: u8) -> Option<FlushSession> {
    if (14..20).contains(&hour) {
        Some(FlushSession::FlushShine)
    } else if hour >= 20 || hour < 2 {
        Some(FlushSession::LastCall)
    } else {
        None
    }
}

/// Current time on the venue wall clock.
pub fn venue_now(offset_hours: i8) -> OffsetDateTime {
    let offset = UtcOffset::from_hms(offset_hours, 0, 0).unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset)
}

/// The session active right now on the venue clock.
pub fn current_session(offset_hours: i8) -> Option<FlushSession> {
    session_for_hour(venue_now(offset_hours).hour())
}

/// Calendar date string used to bucket flush progress, `YYYY-MM-DD`.
pub fn session_date(at: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        at.year(),
        u8::from(at.month()),
        at.day()
    )
}

/// Random five-digit loyalty card number. Uniqueness is the caller's problem.
pub fn generate_card_number() -> String {
    rand::rng().random_range(10_000..100_000).to_string()
}

/// Confirmation code handed out on tournament registration.
pub fn generate_confirmation(year: i32) -> String {
    let suffix: u32 = rand::rng().random_range(1_000..10_000);
    format!("{CONFIRMATION_PREFIX}-{year}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_points_tiers() {
        assert_eq!(cash_points(0.0), 0);
        assert_eq!(cash_points(0.9), 0);
        assert_eq!(cash_points(1.0), CASH_HOURLY_POINTS);
        assert_eq!(cash_points(5.9), CASH_HOURLY_POINTS);
        assert_eq!(cash_points(6.0), CASH_DAILY_POINTS);
        assert_eq!(cash_points(12.0), CASH_DAILY_POINTS);
    }

    #[test]
    fn session_windows() {
        assert_eq!(session_for_hour(13), None);
        assert_eq!(session_for_hour(14), Some(FlushSession::FlushShine));
        assert_eq!(session_for_hour(19), Some(FlushSession::FlushShine));
        assert_eq!(session_for_hour(20), Some(FlushSession::LastCall));
        assert_eq!(session_for_hour(23), Some(FlushSession::LastCall));
        assert_eq!(session_for_hour(0), Some(FlushSession::LastCall));
        assert_eq!(session_for_hour(1), Some(FlushSession::LastCall));
        assert_eq!(session_for_hour(2), None);
        assert_eq!(session_for_hour(9), None);
    }

    #[test]
    fn card_numbers_are_five_digits() {
        for _ in 0..50 {
            let card = generate_card_number();
            assert_eq!(card.len(), 5);
            assert!(card.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(card.chars().next(), Some('0'));
        }
    }

    #[test]
    fn confirmation_code_format() {
        let code = generate_confirmation(2026);
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SR");
        assert_eq!(parts[1], "2026");
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn session_date_is_padded() {
        let at = OffsetDateTime::from_unix_timestamp(1_757_116_800).unwrap(); // 2025-09-06
        assert_eq!(session_date(at), "2025-09-06");
    }
}
