//! Simulated processing latency.

use std::time::Duration;

use tokio::time::sleep;

/// Defers a result by a fixed delay to imitate asynchronous processing.
///
/// The pending completion lives inside the returned future, so dropping the
/// future (a disconnected client, a torn-down view) cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delay {
    duration: Duration,
}

impl Delay {
    /// Create a delay of the given duration.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a delay in milliseconds.
    pub fn with_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A delay that completes immediately.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Wait out the delay, then produce the value.
    pub async fn complete<T, F>(&self, produce: F) -> T
    where
        F: FnOnce() -> T,
    {
        if !self.duration.is_zero() {
            sleep(self.duration).await;
        }
        produce()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delay_elapses_before_value() {
        let delay = Delay::with_millis(1200);

        let start = Instant::now();
        let value = delay.complete(|| 42).await;

        assert_eq!(value, 42);
        assert!(start.elapsed() >= Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn test_zero_delay_is_immediate() {
        let value = Delay::none().complete(|| "done").await;
        assert_eq!(value, "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_future_never_produces() {
        let produced = Arc::new(AtomicBool::new(false));
        let flag = produced.clone();

        let delay = Delay::with_millis(500);
        let pending = tokio::spawn(async move {
            delay.complete(|| flag.store(true, Ordering::SeqCst)).await;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        pending.abort();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(!produced.load(Ordering::SeqCst));
    }
}
