// Per-source periodic tick task

use std::sync::Weak;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};

use super::Inner;
use crate::catalog::TICK_INTERVAL_MS;

pub const TICK_INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Spawns the ticker for one activation of `id`. First tick lands one interval
/// after activation. The task exits when the engine is dropped or when the
/// engine reports the epoch stale.
pub(super) fn spawn(inner: Weak<Inner>, id: String, epoch: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let Some(inner) = inner.upgrade() else {
                break;
            };
            if !inner.apply_tick(&id, epoch).await {
                tracing::trace!(source_id = %id, epoch, "stale ticker exiting");
                break;
            }
        }
    })
}
