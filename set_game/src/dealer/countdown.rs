//! Reshuffle countdown.

use std::time::Duration;
use tokio::time::Instant;

/// Dealer poll interval while far from the deadline
pub const COARSE_TICK: Duration = Duration::from_secs(1);

/// Dealer poll interval inside the warning window
pub const FINE_TICK: Duration = Duration::from_millis(10);

/// Absolute reshuffle deadline, recomputed on every table reset
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    deadline: Instant,
    turn_timeout: Duration,
    warning: Duration,
}

impl Countdown {
    /// Start a countdown ending one full turn from now
    pub fn start(turn_timeout: Duration, warning: Duration) -> Self {
        Self {
            deadline: Instant::now() + turn_timeout,
            turn_timeout,
            warning,
        }
    }

    /// Restart from a full turn timeout
    pub fn reset(&mut self) {
        self.deadline = Instant::now() + self.turn_timeout;
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Whether the remaining time is inside the warning window
    pub fn is_warning(&self) -> bool {
        self.remaining() <= self.warning
    }

    /// How long the dealer may sleep before refreshing the display.
    ///
    /// Coarse while outside the warning window, but never past its start;
    /// fine inside it.
    pub fn poll_interval(&self) -> Duration {
        let remaining = self.remaining();
        if remaining <= self.warning {
            FINE_TICK.min(remaining.max(Duration::from_millis(1)))
        } else {
            COARSE_TICK.min(remaining - self.warning).max(FINE_TICK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_countdown_expires_after_timeout() {
        let countdown = Countdown::start(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(countdown.remaining(), Duration::from_secs(3));
        assert!(!countdown.is_expired());
        assert!(!countdown.is_warning());

        tokio::time::advance(Duration::from_millis(2_500)).await;
        assert!(countdown.is_warning());
        assert!(!countdown.is_expired());

        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(countdown.is_expired());
        assert_eq!(countdown.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_full_timeout() {
        let mut countdown = Countdown::start(Duration::from_secs(10), Duration::from_secs(2));
        tokio::time::advance(Duration::from_secs(7)).await;
        assert_eq!(countdown.remaining(), Duration::from_secs(3));

        countdown.reset();
        assert_eq!(countdown.remaining(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_interval_granularity() {
        let countdown = Countdown::start(Duration::from_secs(10), Duration::from_secs(2));
        assert_eq!(countdown.poll_interval(), COARSE_TICK);

        // 2.5s left: coarse sleep is cut at the warning boundary
        tokio::time::advance(Duration::from_millis(7_500)).await;
        assert_eq!(countdown.poll_interval(), Duration::from_millis(500));

        tokio::time::advance(Duration::from_millis(1_000)).await;
        assert_eq!(countdown.poll_interval(), FINE_TICK);
    }
}
