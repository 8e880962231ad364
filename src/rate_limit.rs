use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 5;
const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-email login brute force limiter.
pub struct LoginRateLimiter {
    /// email -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 5 failures per 15 minutes. Returns the seconds left in the window when
    /// blocked. Does not count the attempt; call `record_failure()` on a bad
    /// password.
    pub fn check(&self, email: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&email.to_lowercase()) else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > WINDOW {
            return Ok(());
        }

        if *count >= MAX_FAILURES {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(WINDOW.as_secs().saturating_sub(elapsed));
        }

        Ok(())
    }

    pub fn record_failure(&self, email: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(email.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > WINDOW {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget an email's failures after a successful login.
    pub fn reset(&self, email: &str) {
        self.entries.remove(&email.to_lowercase());
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_five_failures() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..MAX_FAILURES {
            assert!(limiter.check("user@example.com").is_ok());
            limiter.record_failure("user@example.com");
        }
        let retry_after = limiter.check("user@example.com").unwrap_err();
        assert!(retry_after <= WINDOW.as_secs());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..MAX_FAILURES {
            limiter.record_failure("User@Example.com");
        }
        assert!(limiter.check("user@example.com").is_err());
        assert!(limiter.check("other@example.com").is_ok());
    }

    #[test]
    fn reset_clears_failures() {
        let limiter = LoginRateLimiter::new();
        for _ in 0..MAX_FAILURES {
            limiter.record_failure("user@example.com");
        }
        limiter.reset("user@example.com");
        assert!(limiter.check("user@example.com").is_ok());
    }

    #[test]
    fn cleanup_drops_stale_entries() {
        let limiter = LoginRateLimiter::new();
        limiter.record_failure("user@example.com");
        limiter.cleanup(Duration::ZERO);
        assert!(limiter.entries.is_empty());
    }
}
