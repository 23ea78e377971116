// Background stats worker: periodic app stats at INFO, ticker teardown on shutdown.

use crate::engine::Engine;
use crate::models::Domain;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::Instrument;

/// Engine, connection counter, and shutdown for the worker.
pub struct WorkerDeps {
    pub engine: Engine,
    pub ws_connections: Arc<AtomicUsize>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        engine,
        ws_connections,
        mut shutdown_rx,
    } = deps;
    let stats_log_interval = Duration::from_secs(config.stats_log_interval_secs);

    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        stats_log_interval_secs = config.stats_log_interval_secs
    );

    tokio::spawn(
        async move {
            let mut stats_log_tick =
                interval_at(Instant::now() + stats_log_interval, stats_log_interval);
            stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stats_log_tick.tick() => {
                        let mining = engine.aggregate(Domain::Mining).await;
                        let studio = engine.studio_aggregate().await;
                        tracing::info!(
                            ws_clients = ws_connections.load(Ordering::Relaxed),
                            ticks_total = engine.ticks_total(),
                            active_miners = mining.active_count,
                            total_profit = mining.total_profit,
                            total_hash_rate = mining.total_hash_rate,
                            active_studio_sources = studio.active_count,
                            "app stats"
                        );
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                }
            }
            engine.shutdown().await;
        }
        .instrument(worker_span),
    )
}
