//! Throttling of user dictionary change checks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default minimum interval between two checks of the dictionary source.
pub const DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_secs(60);

/// Decides when the dictionary source should be checked again.
///
/// At most one caller wins the right to check per interval: the winner moves
/// `last_checked` forward with a compare-and-swap, every concurrent caller
/// that loses the race skips the check.
#[derive(Debug)]
pub struct ReloadPolicy {
    min_check_interval: Duration,
    origin: Instant,
    /// Nanoseconds since `origin` of the last claimed check.
    last_checked: AtomicU64,
}

impl ReloadPolicy {
    /// Create a policy whose first check is due one interval from now.
    pub fn new(min_check_interval: Duration) -> Self {
        ReloadPolicy {
            min_check_interval,
            origin: Instant::now(),
            last_checked: AtomicU64::new(0),
        }
    }

    /// Get the minimum check interval.
    pub fn min_check_interval(&self) -> Duration {
        self.min_check_interval
    }

    /// Claim the next check if it is due. Returns `true` for exactly one
    /// caller per elapsed interval.
    pub fn try_claim(&self) -> bool {
        let now = self.now();
        let last = self.last_checked.load(Ordering::Acquire);
        if now.saturating_sub(last) < self.interval_nanos() {
            return false;
        }
        self.last_checked
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Record a check made outside the throttle.
    pub fn mark_checked(&self) {
        self.last_checked.fetch_max(self.now(), Ordering::AcqRel);
    }

    /// Time since the last claimed check.
    pub fn since_last_check(&self) -> Duration {
        let last = self.last_checked.load(Ordering::Acquire);
        Duration::from_nanos(self.now().saturating_sub(last))
    }

    fn interval_nanos(&self) -> u64 {
        u64::try_from(self.min_check_interval.as_nanos()).unwrap_or(u64::MAX)
    }

    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for ReloadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RELOAD_INTERVAL)
    }
}
