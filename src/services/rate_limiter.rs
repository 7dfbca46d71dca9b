use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default spacing between outbound geocoding requests
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Enforces a minimum spacing between outbound calls
///
/// The lock is held while waiting, so callers sharing one limiter are
/// released one at a time, each at least `min_interval` after the previous.
/// State lives only in memory and resets when the process restarts.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a call is allowed, then record it as made now
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!("Rate limiting geocode request for {}ms", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_call_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        let start = Instant::now();

        limiter.acquire().await;

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(200));

        limiter.acquire().await;
        let first = Instant::now();
        limiter.acquire().await;

        assert!(first.elapsed() >= Duration::from_millis(190));
    }

    #[tokio::test]
    async fn test_no_wait_after_interval_passed() {
        let limiter = RateLimiter::new(Duration::from_millis(50));

        limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        let start = Instant::now();
        limiter.acquire().await;

        assert!(start.elapsed() < Duration::from_millis(40));
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(RateLimiter::default().min_interval(), Duration::from_millis(1000));
    }
}
