// ── Simulation controller ──
//
// Session lifecycle for a simulated transit feed. Owns the DataStore, the
// random source, and the background timers that drive the Update Engine,
// the Connection Simulator, the initial handshake, and deferred refreshes.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::SimulatorConfig;
use crate::engine::{ConnectionSimulator, RandomSource, StdRandom, UpdateEngine};
use crate::error::CoreError;
use crate::model::{Bus, BusId, ConnectionStatus, Route, RouteId, Stop, StopId};
use crate::seed;
use crate::store::{DataStore, SnapshotView, TransitSnapshot};
use crate::stream::SnapshotStream;

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. A controller runs at most
/// one session at a time; `stop()` followed by `start()` begins a fresh one
/// with re-seeded data.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: SimulatorConfig,
    store: Arc<DataStore>,
    engine: UpdateEngine,
    connection: ConnectionSimulator,
    /// Shared by every writer; only ever locked inside a store update so the
    /// draw order matches the commit order.
    rng: Mutex<Box<dyn RandomSource>>,
    session: Mutex<Option<Session>>,
}

/// Timers and bookkeeping for one running session.
struct Session {
    city: String,
    cancel: CancellationToken,
    runtime: Handle,
    task_handles: Vec<JoinHandle<()>>,
}

impl Controller {
    /// Create a controller whose randomness follows `config.seed`.
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = StdRandom::new(config.seed);
        Self::with_random_source(config, Box::new(rng))
    }

    /// Create a controller driven by an explicit random source.
    pub fn with_random_source(config: SimulatorConfig, rng: Box<dyn RandomSource>) -> Self {
        let engine = UpdateEngine::new(config.tuning.clone());
        let connection = ConnectionSimulator::new(config.tuning.clone());

        Self {
            inner: Arc::new(ControllerInner {
                config,
                store: Arc::new(DataStore::new(TransitSnapshot::idle())),
                engine,
                connection,
                rng: Mutex::new(rng),
                session: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Seed the store for `city` and start the background timers.
    ///
    /// Must be called from within a Tokio runtime; the timers are spawned
    /// onto it. Every city id currently receives the San Francisco dataset.
    pub fn start(&self, city: &str) -> Result<(), CoreError> {
        self.inner.config.validate()?;
        let runtime = Handle::try_current().map_err(|e| CoreError::RuntimeUnavailable {
            reason: e.to_string(),
        })?;

        let mut session = self.lock_session();
        if let Some(running) = session.as_ref() {
            return Err(CoreError::AlreadyRunning {
                city: running.city.clone(),
            });
        }

        self.inner.store.reset(seed::dataset(city, Utc::now()));

        let config = &self.inner.config;
        let cancel = CancellationToken::new();
        let mut handles = Vec::new();

        if !config.handshake_delay.is_zero() {
            let ctrl = self.clone();
            let cancel = cancel.clone();
            handles.push(runtime.spawn(handshake_task(ctrl, config.handshake_delay, cancel)));
        }

        if !config.update_interval.is_zero() {
            let ctrl = self.clone();
            let cancel = cancel.clone();
            handles.push(runtime.spawn(update_task(ctrl, config.update_interval, cancel)));
        }

        if !config.connection_interval.is_zero() {
            let ctrl = self.clone();
            let cancel = cancel.clone();
            handles.push(runtime.spawn(connection_task(ctrl, config.connection_interval, cancel)));
        }

        *session = Some(Session {
            city: city.to_owned(),
            cancel,
            runtime,
            task_handles: handles,
        });

        info!(
            city,
            update_interval = ?config.update_interval,
            connection_interval = ?config.connection_interval,
            "simulation started"
        );
        Ok(())
    }

    /// Cancel every timer of the running session, wait for them to finish,
    /// and mark the feed `disconnected`. A no-op when nothing is running.
    pub async fn stop(&self) {
        let Some(session) = self.lock_session().take() else {
            return;
        };

        session.cancel.cancel();
        for handle in session.task_handles {
            let _ = handle.await;
        }

        self.set_status(ConnectionStatus::Disconnected);
        info!(city = %session.city, "simulation stopped");
    }

    pub fn is_running(&self) -> bool {
        self.lock_session().is_some()
    }

    /// City of the running session.
    pub fn city(&self) -> Option<String> {
        self.lock_session().as_ref().map(|s| s.city.clone())
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Mark the feed `connecting` now and schedule one extra update tick
    /// after the refresh delay. Returns immediately.
    ///
    /// Ignored when no session is running. A pending refresh is dropped if
    /// the session stops before it fires.
    pub fn refresh_data(&self) {
        let mut session = self.lock_session();
        let Some(session) = session.as_mut() else {
            warn!("refresh requested with no running simulation, ignoring");
            return;
        };

        self.set_status(ConnectionStatus::Connecting);

        session.task_handles.retain(|h| !h.is_finished());
        let ctrl = self.clone();
        let delay = self.inner.config.refresh_delay;
        let cancel = session.cancel.clone();
        session
            .task_handles
            .push(session.runtime.spawn(refresh_task(ctrl, delay, cancel)));
        debug!(?delay, "refresh scheduled");
    }

    /// Run one Update Engine pass and publish the result.
    ///
    /// Without a running session nothing is committed and the current
    /// snapshot is returned unchanged.
    pub fn tick(&self) -> Arc<TransitSnapshot> {
        if !self.is_running() {
            warn!("update tick requested with no running simulation, ignoring");
            return self.inner.store.get();
        }
        let now = Utc::now();
        let next = self.inner.store.update(|prev| {
            let mut rng = self.lock_rng();
            self.inner.engine.advance(prev, now, &mut **rng)
        });
        debug!(
            update_count = next.update_count,
            buses = next.buses.len(),
            stops = next.stops.len(),
            "update tick committed"
        );
        next
    }

    /// Run one Connection Simulator step. Publishes only when the status
    /// actually changes, and never while idle.
    pub fn connection_tick(&self) -> ConnectionStatus {
        if !self.is_running() {
            return self.inner.store.get().connection_status;
        }
        let changed = self.inner.store.try_update(|prev| {
            let mut rng = self.lock_rng();
            let next = self
                .inner
                .connection
                .next_status(prev.connection_status, &mut **rng);
            (next != prev.connection_status).then(|| prev.with_status(next))
        });

        match changed {
            Some(snapshot) => {
                debug!(status = %snapshot.connection_status, "connection status changed");
                snapshot.connection_status
            }
            None => self.inner.store.get().connection_status,
        }
    }

    /// Complete the initial handshake: `connected`, stamped with the current
    /// time. The update count is left untouched.
    pub fn complete_handshake(&self) {
        let now = Utc::now();
        self.inner.store.update(|prev| TransitSnapshot {
            connection_status: ConnectionStatus::Connected,
            last_update: Some(now),
            ..prev.clone()
        });
        debug!("handshake complete");
    }

    fn set_status(&self, status: ConnectionStatus) {
        self.inner.store.update(|prev| prev.with_status(status));
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: start, handshake, run closure, stop.
    ///
    /// Disables every timer so the closure alone decides how the state
    /// advances (typically by calling [`tick`](Self::tick)).
    pub async fn oneshot<F, Fut, T>(config: SimulatorConfig, city: &str, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.update_interval = Duration::ZERO;
        cfg.connection_interval = Duration::ZERO;
        cfg.handshake_delay = Duration::ZERO;

        let controller = Controller::new(cfg);
        controller.start(city)?;
        controller.complete_handshake();
        let result = f(controller.clone()).await;
        controller.stop().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Current state plus derived `is_loading` / `has_error` flags.
    pub fn get_snapshot(&self) -> SnapshotView {
        self.inner.store.view()
    }

    pub fn snapshot(&self) -> Arc<TransitSnapshot> {
        self.inner.store.get()
    }

    /// Subscribe to every committed snapshot replacement.
    pub fn subscribe(&self) -> SnapshotStream {
        self.inner.store.subscribe()
    }

    pub fn bus(&self, id: &BusId) -> Option<Bus> {
        self.snapshot().bus(id).cloned()
    }

    pub fn stop_by_id(&self, id: &StopId) -> Option<Stop> {
        self.snapshot().stop(id).cloned()
    }

    pub fn route(&self, id: &RouteId) -> Option<Route> {
        self.snapshot().route(id).cloned()
    }

    // ── Private helpers ──────────────────────────────────────────

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        self.inner.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Background tasks ─────────────────────────────────────────────

async fn handshake_task(controller: Controller, delay: Duration, cancel: CancellationToken) {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {}
        () = tokio::time::sleep(delay) => controller.complete_handshake(),
    }
}

/// Periodic Update Engine ticks. Missed ticks are skipped, never queued.
async fn update_task(controller: Controller, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                controller.tick();
            }
        }
    }
}

async fn connection_task(controller: Controller, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                controller.connection_tick();
            }
        }
    }
}

async fn refresh_task(controller: Controller, delay: Duration, cancel: CancellationToken) {
    tokio::select! {
        biased;
        () = cancel.cancelled() => debug!("pending refresh dropped"),
        () = tokio::time::sleep(delay) => {
            controller.tick();
        }
    }
}
