use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::engine::{DashboardConfig, DashboardError};
use crate::models::{DashboardStats, TransactionRecord};
use crate::sources::{EventSource, HistoricalSource};
use crate::storage::{AggregationStore, Snapshot};
use crate::views::DashboardViews;

const VIEW_CACHE_ENTRIES: u64 = 16;
const SECONDS_PER_HOUR: i64 = 3_600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped
}

/// Store plus the gate deciding whether ingestion is still allowed. Both live
/// behind one lock so `stop` can close the gate atomically with respect to
/// any in-flight ingest.
struct Session {
    store: AggregationStore,
    lifecycle: Lifecycle
}

struct Subscription {
    producer: JoinHandle<()>,
    consumer: JoinHandle<()>
}

impl Subscription {
    fn abort(self) {
        self.producer.abort();
        self.consumer.abort();
    }
}

/// Owns a dashboard session: seeds the store from history, feeds it live
/// events and serves the derived views.
pub struct Dashboard {
    config: DashboardConfig,
    session: Arc<Mutex<Session>>,
    history: Arc<dyn HistoricalSource>,
    events: Mutex<Option<Box<dyn EventSource>>>,
    subscription: Mutex<Option<Subscription>>,
    views: Cache<(u64, i64), Arc<DashboardViews>>
}

impl Dashboard {
    pub fn new<H, E>(config: DashboardConfig, history: H, events: E) -> Self
    where
        H: HistoricalSource + 'static,
        E: EventSource + 'static
    {
        let session = Session {
            store: AggregationStore::new(config.capacity),
            lifecycle: Lifecycle::Idle
        };

        let views = Cache::builder()
            .max_capacity(VIEW_CACHE_ENTRIES)
            .time_to_live(Duration::from_secs(SECONDS_PER_HOUR as u64))
            .build();

        Self {
            config,
            session: Arc::new(Mutex::new(session)),
            history: Arc::new(history),
            events: Mutex::new(Some(Box::new(events))),
            subscription: Mutex::new(None),
            views
        }
    }

    /// Loads history into the store and starts the live subscription.
    ///
    /// A failing historical fetch never fails the session: missing stats are
    /// zeroed and missing transactions leave the window empty.
    ///
    /// # Errors
    /// Returns `AlreadyStarted` on a second call and `SubscriptionClosed` once
    /// the dashboard has been stopped.
    pub async fn start(&self) -> Result<(), DashboardError> {
        let events = {
            let mut session = lock(&self.session);

            match session.lifecycle {
                Lifecycle::Running => return Err(DashboardError::AlreadyStarted),
                Lifecycle::Stopped => return Err(DashboardError::SubscriptionClosed),
                Lifecycle::Idle => {}
            }

            let Some(events) = lock(&self.events).take() else {
                return Err(DashboardError::AlreadyStarted)
            };

            session.lifecycle = Lifecycle::Running;
            events
        };

        let (stats, transactions) = tokio::join!(
            self.history.fetch_stats(),
            self.history.fetch_recent_transactions()
        );

        let stats = stats.unwrap_or_else(|error| {
            warn!("Falling back to zeroed stats: {error}");
            DashboardStats::default()
        });

        let transactions = transactions.unwrap_or_else(|error| {
            warn!("Falling back to an empty window: {error}");
            Vec::new()
        });

        {
            let mut session = lock(&self.session);

            if session.lifecycle != Lifecycle::Running {
                return Err(DashboardError::SubscriptionClosed);
            }

            if let Err(error) = session.store.initialize(transactions, stats) {
                warn!("Seed rejected, starting from an empty store: {error}");
                session.store.initialize(Vec::new(), DashboardStats::default())?;
            }
        }

        let (sender, receiver) = mpsc::channel::<TransactionRecord>(self.config.channel_capacity.max(1));
        let producer = spawn_producer(events, self.config.tick_interval, sender);
        let consumer = spawn_consumer(self.session.clone(), receiver);

        let subscription = Subscription { producer, consumer };

        {
            //NOTE: Holding the session lock orders this against `stop`, which takes it before draining the subscription
            let session = lock(&self.session);

            if session.lifecycle != Lifecycle::Running {
                subscription.abort();
                return Err(DashboardError::SubscriptionClosed);
            }

            *lock(&self.subscription) = Some(subscription);
        }

        info!("Dashboard started with a window of {}", self.config.capacity);

        Ok(())
    }

    /// Cancels the subscription. Once this returns no further record is
    /// ingested. Calling it again is a no-op.
    pub fn stop(&self) {
        {
            let mut session = lock(&self.session);

            if session.lifecycle == Lifecycle::Stopped {
                return;
            }

            session.lifecycle = Lifecycle::Stopped;
        }

        lock(&self.events).take();

        if let Some(subscription) = lock(&self.subscription).take() {
            subscription.abort();
        }

        info!("Dashboard stopped");
    }

    pub fn is_running(&self) -> bool {
        lock(&self.session).lifecycle == Lifecycle::Running
    }

    /// Ingests a record through the same serialized path as live events.
    ///
    /// # Errors
    /// Returns `Store(InvalidRecord)` for malformed records and
    /// `SubscriptionClosed` after `stop`. The latter is a caller bug and
    /// panics in debug builds.
    pub fn push(&self, transaction: TransactionRecord) -> Result<(), DashboardError> {
        let result = deliver(&self.session, transaction);

        if cfg!(debug_assertions) && matches!(result, Err(DashboardError::SubscriptionClosed)) {
            panic!("Dashboard::push called after stop");
        }

        result
    }

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.session).store.snapshot()
    }

    /// Views for the latest snapshot, recomputed only when the store changed
    /// or the hour rolled over.
    pub async fn current_views(&self) -> Arc<DashboardViews> {
        let snapshot = self.snapshot();
        let now = Utc::now();
        let key = (snapshot.revision, now.timestamp().div_euclid(SECONDS_PER_HOUR));
        let feed_length = self.config.feed_length;

        self.views
            .get_with(key, async move { Arc::new(DashboardViews::compute(&snapshot, now, feed_length)) })
            .await
    }

    /// Uncached views as of `now`.
    pub fn views_at(&self, now: DateTime<Utc>) -> DashboardViews {
        DashboardViews::compute(&self.snapshot(), now, self.config.feed_length)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if let Some(subscription) = lock(&self.subscription).take() {
            subscription.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn deliver(session: &Mutex<Session>, transaction: TransactionRecord) -> Result<(), DashboardError> {
    let mut session = lock(session);

    if session.lifecycle == Lifecycle::Stopped {
        return Err(DashboardError::SubscriptionClosed);
    }

    let transaction_id = transaction.id.clone();
    session.store.ingest(transaction)?;

    debug!("Transaction [{transaction_id}] ingested");

    Ok(())
}

fn spawn_producer(
    mut events: Box<dyn EventSource>,
    period: Duration,
    sender: mpsc::Sender<TransactionRecord>
) -> JoinHandle<()> {
    spawn(async move {
        let period = period.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let Some(transaction) = events.next_transaction().await else {
                info!("Event source exhausted");
                break;
            };

            if sender.send(transaction).await.is_err() {
                break;
            }
        }
    })
}

fn spawn_consumer(session: Arc<Mutex<Session>>, mut receiver: mpsc::Receiver<TransactionRecord>) -> JoinHandle<()> {
    spawn(async move {
        while let Some(transaction) = receiver.recv().await {
            match deliver(&session, transaction) {
                Ok(_) => {}
                Err(DashboardError::SubscriptionClosed) => {
                    debug!("Subscription closed, discarding remaining events");
                    break;
                }
                Err(error) => {
                    warn!("Dropped live event: {error}");
                }
            }
        }
    })
}
