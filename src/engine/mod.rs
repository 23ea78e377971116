// Async shell around the dashboard: one lock for all state, one ticker per
// active source, a broadcast of the full snapshot after every change.

mod ticker;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::dashboard::Dashboard;
use crate::error::EngineError;
use crate::models::{
    AggregateView, DashboardSnapshot, Domain, SourceSnapshot, TimelineCommand, TimelineView,
    Transition, Transport, TransportCommand,
};
use crate::rng::RandomSource;

pub use ticker::TICK_INTERVAL;

/// Cheap to clone; clones share the same dashboard.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    state: RwLock<State>,
    tx: broadcast::Sender<DashboardSnapshot>,
    ticks_total: AtomicU64,
}

struct State {
    board: Dashboard,
    rng: Box<dyn RandomSource>,
    timers: HashMap<String, JoinHandle<()>>,
}

impl Inner {
    /// Applies a scheduled tick under the write lock. False once `epoch` is stale.
    async fn apply_tick(&self, id: &str, epoch: u64) -> bool {
        let mut guard = self.state.write().await;
        let State { board, rng, .. } = &mut *guard;
        if !board.tick(id, epoch, &mut **rng) {
            return false;
        }
        self.ticks_total.fetch_add(1, Ordering::Relaxed);
        self.publish(board);
        true
    }

    fn publish(&self, board: &Dashboard) {
        // No receivers just means no client is connected.
        if self.tx.send(board.snapshot()).is_err() {
            tracing::trace!(operation = "publish_snapshot", "no subscribers");
        }
    }
}

impl Engine {
    /// Must be called inside a Tokio runtime: tickers start immediately for
    /// sources that begin active.
    pub fn new(board: Dashboard, rng: Box<dyn RandomSource>, broadcast_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(broadcast_capacity.max(1));
        let inner = Arc::new_cyclic(|weak| {
            let timers = board
                .running()
                .into_iter()
                .map(|(id, epoch)| {
                    let handle = ticker::spawn(weak.clone(), id.clone(), epoch);
                    (id, handle)
                })
                .collect();
            Inner {
                state: RwLock::new(State { board, rng, timers }),
                tx,
                ticks_total: AtomicU64::new(0),
            }
        });
        Self { inner }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Ticks applied since start.
    pub fn ticks_total(&self) -> u64 {
        self.inner.ticks_total.load(Ordering::Relaxed)
    }

    /// Number of ticker tasks currently held.
    pub async fn running_timers(&self) -> usize {
        self.inner.state.read().await.timers.len()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.state.read().await.board.snapshot()
    }

    pub async fn source(&self, id: &str) -> Result<SourceSnapshot, EngineError> {
        self.inner.state.read().await.board.source_snapshot(id)
    }

    pub async fn aggregate(&self, domain: Domain) -> AggregateView {
        self.inner.state.read().await.board.aggregate(domain)
    }

    pub async fn studio_aggregate(&self) -> AggregateView {
        self.inner.state.read().await.board.studio_aggregate()
    }

    pub async fn aggregate_all(&self) -> AggregateView {
        self.inner.state.read().await.board.aggregate_all()
    }

    #[instrument(skip(self), fields(operation = "toggle"))]
    pub async fn toggle(&self, id: &str) -> Result<Transition, EngineError> {
        let mut state = self.inner.state.write().await;
        let transition = state.board.toggle(id)?;
        self.apply_transition(&mut state.timers, id, transition);
        self.inner.publish(&state.board);
        Ok(transition)
    }

    /// Switches every source in one step. The returned aggregate is computed
    /// under the same lock as the switch.
    #[instrument(skip(self), fields(operation = "set_all_active"))]
    pub async fn set_all_active(&self, active: bool) -> AggregateView {
        let mut state = self.inner.state.write().await;
        let transitions = state.board.set_all_active(active);
        for (id, transition) in &transitions {
            self.apply_transition(&mut state.timers, id, *transition);
        }
        debug!(changed = transitions.len(), "bulk toggle");
        self.inner.publish(&state.board);
        state.board.aggregate_all()
    }

    #[instrument(
        skip(self, domain),
        fields(operation = "set_domain_active", domain = domain.as_str())
    )]
    pub async fn set_domain_active(&self, domain: Domain, active: bool) -> AggregateView {
        let mut state = self.inner.state.write().await;
        let transitions = state.board.set_domain_active(domain, active);
        for (id, transition) in &transitions {
            self.apply_transition(&mut state.timers, id, *transition);
        }
        debug!(changed = transitions.len(), "bulk toggle");
        self.inner.publish(&state.board);
        state.board.aggregate(domain)
    }

    pub async fn update_parameter(
        &self,
        id: &str,
        key: &str,
        value: f64,
    ) -> Result<SourceSnapshot, EngineError> {
        let mut state = self.inner.state.write().await;
        state.board.update_parameter(id, key, value)?;
        self.inner.publish(&state.board);
        state.board.source_snapshot(id)
    }

    pub async fn transport(&self, command: TransportCommand) -> Transport {
        let mut state = self.inner.state.write().await;
        state.board.transport.apply(command);
        self.inner.publish(&state.board);
        state.board.transport.clone()
    }

    pub async fn set_bpm(&self, bpm: f64) -> Result<Transport, EngineError> {
        let mut state = self.inner.state.write().await;
        state.board.transport.set_bpm(bpm)?;
        self.inner.publish(&state.board);
        Ok(state.board.transport.clone())
    }

    pub async fn set_master_volume(&self, volume: f64) -> Result<Transport, EngineError> {
        let mut state = self.inner.state.write().await;
        state.board.transport.set_master_volume(volume)?;
        self.inner.publish(&state.board);
        Ok(state.board.transport.clone())
    }

    pub async fn timeline(&self) -> TimelineView {
        self.inner.state.read().await.board.timeline.view()
    }

    pub async fn timeline_command(&self, command: TimelineCommand) -> TimelineView {
        let mut state = self.inner.state.write().await;
        state.board.timeline.apply(command);
        self.inner.publish(&state.board);
        state.board.timeline.view()
    }

    /// Cancels every ticker and marks every source inactive. A later start
    /// spawns fresh tickers.
    pub async fn shutdown(&self) {
        let mut state = self.inner.state.write().await;
        let stopped = state.board.set_all_active(false).len();
        let n = state.timers.len();
        for (_, handle) in state.timers.drain() {
            handle.abort();
        }
        debug!(timers = n, stopped, "tickers cancelled");
        self.inner.publish(&state.board);
    }

    /// Starts or cancels the ticker for `id`. Runs with the write lock held, so
    /// a tick already queued on the lock sees the bumped epoch and drops out.
    fn apply_transition(
        &self,
        timers: &mut HashMap<String, JoinHandle<()>>,
        id: &str,
        transition: Transition,
    ) {
        if let Some(old) = timers.remove(id) {
            old.abort();
        }
        match transition {
            Transition::Activated { epoch } => {
                let handle = ticker::spawn(Arc::downgrade(&self.inner), id.to_string(), epoch);
                timers.insert(id.to_string(), handle);
                debug!(source_id = %id, epoch, active = true, "source activated");
            }
            Transition::Deactivated => {
                debug!(source_id = %id, active = false, "source deactivated");
            }
        }
    }
}
