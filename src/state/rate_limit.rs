//! In-memory fixed-window limiter for the login endpoints. Keys are the
//! submitted login identifier; the service sits behind the venue proxy, so
//! peer addresses are not meaningful.

use std::time::{Duration, Instant};

use dashmap::DashMap;

const WINDOW: Duration = Duration::from_secs(15 * 60);
const MAX_ATTEMPTS: usize = 5;
const BLOCK_DURATION: Duration = Duration::from_secs(15 * 60);

/// Tracks failed login attempts and temporary lockouts per identifier.
#[derive(Default)]
pub struct LoginRateLimiter {
    attempts: DashMap<String, Vec<Instant>>,
    blocked: DashMap<String, Instant>,
}

impl LoginRateLimiter {
    /// Whether the identifier is currently locked out.
    pub fn is_blocked(&self, key: &str) -> bool {
        if let Some(entry) = self.blocked.get(key) {
            if Instant::now() < *entry {
                return true;
            }
        }
        // Lockout expired; forget it.
        self.blocked.remove(key);
        false
    }

    /// Record an attempt outcome. Returns `true` when this failure tripped
    /// the lockout.
    pub fn record_attempt(&self, key: &str, success: bool) -> bool {
        if success {
            self.attempts.remove(key);
            return false;
        }

        let now = Instant::now();
        let mut entry = self.attempts.entry(key.to_owned()).or_default();
        entry.retain(|at| now.duration_since(*at) < WINDOW);
        entry.push(now);

        if entry.len() >= MAX_ATTEMPTS {
            self.blocked.insert(key.to_owned(), now + BLOCK_DURATION);
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_clears_failures() {
        let limiter = LoginRateLimiter::default();
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert!(!limiter.record_attempt("12345", false));
        }
        assert!(!limiter.record_attempt("12345", true));
        // Counter reset; a further failure starts from scratch.
        assert!(!limiter.record_attempt("12345", false));
        assert!(!limiter.is_blocked("12345"));
    }

    #[test]
    fn lockout_after_max_failures() {
        let limiter = LoginRateLimiter::default();
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert!(!limiter.record_attempt("admin", false));
        }
        assert!(limiter.record_attempt("admin", false));
        assert!(limiter.is_blocked("admin"));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = LoginRateLimiter::default();
        for _ in 0..MAX_ATTEMPTS {
            limiter.record_attempt("alpha", false);
        }
        assert!(limiter.is_blocked("alpha"));
        assert!(!limiter.is_blocked("beta"));
    }
}
