//! Live feed buffer and the scheduled task that keeps it moving.
//!
//! The [`FeedHub`] owns the visible events and fans new ones out to
//! subscribers. A [`FeedTask`] is the only writer: it seeds the hub, then
//! ticks on a fixed period until its [`FeedHandle`] is stopped or dropped.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use crate::feed::{FeedEvent, SignalGenerator};

/// Capacity of the broadcast channel feeding stream subscribers.
const BROADCAST_CAPACITY: usize = 32;

/// Capped, newest-first list of feed events.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    events: VecDeque<FeedEvent>,
    max_len: usize,
}

impl LiveFeed {
    /// Create an empty feed showing at most `max_len` events.
    pub fn new(max_len: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    /// Prepend an event and drop whatever falls past the cap.
    pub fn push(&mut self, event: FeedEvent) {
        self.events.push_front(event);
        self.events.truncate(self.max_len);
    }

    /// Visible events, newest first.
    pub fn events(&self) -> Vec<FeedEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Shared owner of the live feed.
///
/// Cheap to clone; all clones see the same feed.
#[derive(Debug, Clone)]
pub struct FeedHub {
    feed: Arc<RwLock<LiveFeed>>,
    tx: broadcast::Sender<FeedEvent>,
}

impl FeedHub {
    /// Create a hub with an empty feed capped at `max_len`.
    pub fn new(max_len: usize) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            feed: Arc::new(RwLock::new(LiveFeed::new(max_len))),
            tx,
        }
    }

    /// Copy of the visible events, newest first.
    pub async fn snapshot(&self) -> Vec<FeedEvent> {
        self.feed.read().await.events()
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.tx.subscribe()
    }

    /// Add an event to the feed and notify subscribers.
    pub async fn publish(&self, event: FeedEvent) {
        self.feed.write().await.push(event.clone());
        // No subscribers is the normal idle state.
        let _ = self.tx.send(event);
    }
}

/// Spawns the periodic generator task.
pub struct FeedTask;

impl FeedTask {
    /// Seed the hub, then publish one generated event per profile period.
    ///
    /// The period comes from the generator's profile, which never holds a
    /// zero period. The first tick fires one full period after the seeds
    /// land. The task runs until the returned handle is stopped or dropped.
    pub fn spawn<R>(mut generator: SignalGenerator<R>, hub: FeedHub) -> FeedHandle
    where
        R: Rng + Send + 'static,
    {
        let period = generator.profile().period();
        let handle = tokio::spawn(async move {
            for event in generator.seed_events().into_iter().rev() {
                hub.publish(event).await;
            }

            info!(
                profile = generator.profile().name(),
                period = ?period,
                "Live feed started"
            );

            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                let event = generator.tick();
                debug!(id = event.id, "Publishing feed event");
                hub.publish(event).await;
            }
        });

        FeedHandle {
            handle: Some(handle),
        }
    }
}

/// Cancellation handle for a running [`FeedTask`].
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct FeedHandle {
    handle: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Whether the task is still ticking.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Cancel the task and wait for it to wind down.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // A cancelled task reports a JoinError; that is the expected outcome.
            let _ = handle.await;
            info!("Live feed stopped");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{EventKind, FeedProfile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn event(id: u64) -> FeedEvent {
        FeedEvent {
            id,
            kind: EventKind::Verified,
            subject: "CHI→ATL".to_string(),
            carrier: "XPO".to_string(),
            amount: None,
            timestamp: "10:00:00".to_string(),
        }
    }

    fn generator() -> SignalGenerator<StdRng> {
        generator_every(Duration::from_millis(2500))
    }

    fn generator_every(period: Duration) -> SignalGenerator<StdRng> {
        let profile = FeedProfile::exchange().with_period(period).unwrap();
        SignalGenerator::with_rng(profile, StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_push_prepends_and_caps() {
        let mut feed = LiveFeed::new(3);
        for id in 1..=10 {
            feed.push(event(id));
            assert!(feed.len() <= 3);
            assert_eq!(feed.events()[0].id, id);
        }
        let ids: Vec<u64> = feed.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 9, 8]);
    }

    #[tokio::test]
    async fn test_hub_publish_notifies_subscribers() {
        let hub = FeedHub::new(5);
        let mut rx = hub.subscribe();

        hub.publish(event(42)).await;

        assert_eq!(rx.recv().await.unwrap().id, 42);
        assert_eq!(hub.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let hub = FeedHub::new(2);
        hub.publish(event(1)).await;
        hub.publish(event(2)).await;
        hub.publish(event(3)).await;

        let ids: Vec<u64> = hub.snapshot().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_seeds_then_ticks() {
        let hub = FeedHub::new(5);
        let period = Duration::from_millis(2500);
        let handle = FeedTask::spawn(generator(), hub.clone());

        tokio::time::sleep(Duration::from_millis(10)).await;
        let seeded = hub.snapshot().await;
        assert_eq!(seeded.len(), 4);
        assert_eq!(seeded[0].id, 4);

        tokio::time::sleep(period * 3).await;
        let events = hub.snapshot().await;
        assert_eq!(events.len(), 5);
        assert!(events[0].id > 4);
        assert!(events.windows(2).all(|w| w[0].id > w[1].id));

        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_ticks_on_profile_period() {
        let hub = FeedHub::new(5);
        let handle = FeedTask::spawn(generator_every(Duration::from_millis(700)), hub.clone());

        tokio::time::sleep(Duration::from_millis(690)).await;
        assert_eq!(hub.snapshot().await[0].id, 4);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(hub.snapshot().await[0].id, 5);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_task_no_longer_publishes() {
        let hub = FeedHub::new(5);
        let period = Duration::from_millis(1000);
        let handle = FeedTask::spawn(generator_every(period), hub.clone());

        tokio::time::sleep(period * 2 + Duration::from_millis(10)).await;
        handle.stop().await;

        let frozen = hub.snapshot().await;
        tokio::time::sleep(period * 5).await;
        assert_eq!(hub.snapshot().await, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_task() {
        let hub = FeedHub::new(5);
        let period = Duration::from_millis(1000);
        let mut rx = hub.subscribe();

        let handle = FeedTask::spawn(generator_every(period), hub.clone());
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);

        // Drain the seeds, then nothing else arrives.
        for _ in 0..4 {
            rx.recv().await.unwrap();
        }
        tokio::time::sleep(period * 5).await;
        assert!(rx.try_recv().is_err());
    }
}
