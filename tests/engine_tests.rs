// Engine timers on a paused Tokio clock: tick cadence, cancellation, bulk toggle

mod common;

use common::{assert_close, default_engine, engine_with, rig};
use simdash::catalog;
use simdash::error::EngineError;
use simdash::models::{Domain, Transition};
use tokio::time::{Duration, sleep};

#[tokio::test(start_paused = true)]
async fn active_source_ticks_once_per_second() {
    let engine = engine_with(vec![rig("btc", 10.0, 1.0)], 0.5);
    assert!(matches!(
        engine.toggle("btc").await.unwrap(),
        Transition::Activated { .. }
    ));

    sleep(Duration::from_millis(900)).await;
    assert_eq!(engine.ticks_total(), 0, "first tick lands one interval later");

    sleep(Duration::from_millis(4_600)).await;
    assert_eq!(engine.ticks_total(), 5);
    let btc = engine.source("btc").await.unwrap();
    assert_close(btc.counters["progress"], 5.0);
    assert_close(btc.counters["hashRate"], 25.0);
}

#[tokio::test(start_paused = true)]
async fn no_tick_after_deactivation() {
    let engine = engine_with(vec![rig("btc", 10.0, 1.0)], 0.5);
    engine.toggle("btc").await.unwrap();
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(engine.ticks_total(), 2);

    assert_eq!(engine.toggle("btc").await.unwrap(), Transition::Deactivated);
    assert_eq!(engine.running_timers().await, 0);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(engine.ticks_total(), 2);
    let btc = engine.source("btc").await.unwrap();
    assert!(!btc.active);
    assert_eq!(btc.counters["progress"], 0.0);
    assert_eq!(btc.counters["hashRate"], 0.0);
}

#[tokio::test(start_paused = true)]
async fn rapid_toggling_keeps_a_single_ticker() {
    let engine = engine_with(vec![rig("btc", 10.0, 1.0)], 0.5);
    for _ in 0..7 {
        engine.toggle("btc").await.unwrap();
    }
    assert_eq!(engine.running_timers().await, 1);
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(engine.ticks_total(), 3);
}

#[tokio::test(start_paused = true)]
async fn blocks_persist_across_stop_and_restart() {
    let engine = engine_with(vec![rig("btc", 10.0, 1.0)], 0.05);
    engine.toggle("btc").await.unwrap();
    sleep(Duration::from_millis(5_500)).await;
    let before = engine.source("btc").await.unwrap();
    assert_close(before.counters["blocks"], 5.0);

    engine.toggle("btc").await.unwrap();
    engine.toggle("btc").await.unwrap();
    let restarted = engine.source("btc").await.unwrap();
    assert!(restarted.active);
    assert_eq!(restarted.counters["progress"], 0.0);
    assert_close(restarted.counters["blocks"], 5.0);

    sleep(Duration::from_millis(1_500)).await;
    let after = engine.source("btc").await.unwrap();
    assert_close(after.counters["blocks"], 6.0);
}

#[tokio::test(start_paused = true)]
async fn enabled_effects_tick_from_startup() {
    let engine = default_engine();
    assert_eq!(engine.running_timers().await, 2);
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(engine.ticks_total(), 2);
    let reverb = engine.source("reverb").await.unwrap();
    assert_close(reverb.counters["load"], 1.0);
}

#[tokio::test(start_paused = true)]
async fn set_all_active_is_observed_as_one_step() {
    let engine = default_engine();
    let total = catalog::default_sources().len();
    let mut rx = engine.subscribe();

    let view = engine.set_all_active(true).await;
    assert_eq!(view.active_count, total);
    assert_eq!(engine.aggregate_all().await.active_count, total);
    assert_eq!(engine.running_timers().await, total);

    let published = rx.recv().await.unwrap();
    assert!(published.sources.iter().all(|s| s.active));
    assert_eq!(published.mining.active_count, 4);

    let view = engine.set_all_active(false).await;
    assert_eq!(view.active_count, 0);
    assert_eq!(engine.running_timers().await, 0);
    let ticks = engine.ticks_total();
    sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.ticks_total(), ticks);
}

#[tokio::test(start_paused = true)]
async fn start_all_miners_only_touches_mining() {
    let engine = default_engine();
    let view = engine.set_domain_active(Domain::Mining, true).await;
    assert_eq!(view.active_count, 4);
    assert_close(view.total_profit, 12.45 + 8.32 + 5.67 + 3.21);
    assert_eq!(engine.studio_aggregate().await.active_count, 2);
    assert_eq!(engine.running_timers().await, 6);
}

#[tokio::test(start_paused = true)]
async fn unknown_source_is_not_found() {
    let engine = default_engine();
    assert_eq!(
        engine.toggle("nope").await,
        Err(EngineError::NotFound { id: "nope".into() })
    );
    assert!(engine.source("nope").await.is_err());
    assert!(engine.update_parameter("nope", "volume", 1.0).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn user_parameters_are_not_perturbed_by_ticks() {
    let engine = default_engine();
    engine.toggle("drums").await.unwrap();
    let updated = engine.update_parameter("drums", "volume", 42.0).await.unwrap();
    assert_eq!(updated.parameters["volume"], 42.0);

    sleep(Duration::from_millis(3_500)).await;
    let drums = engine.source("drums").await.unwrap();
    assert_eq!(drums.parameters["volume"], 42.0);
    assert_eq!(drums.parameters["pan"], 0.0);
    assert!(drums.counters["level"] > 0.0);

    assert!(matches!(
        engine.update_parameter("drums", "pan", 80.0).await,
        Err(EngineError::OutOfRange { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_tickers_and_clears_flags() {
    let engine = default_engine();
    engine.toggle("bitcoin").await.unwrap();
    engine.shutdown().await;
    assert_eq!(engine.running_timers().await, 0);
    assert_eq!(engine.aggregate_all().await.active_count, 0);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(engine.ticks_total(), 0);
    assert!(!engine.source("bitcoin").await.unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn start_all_after_shutdown_ticks_every_source() {
    let engine = default_engine();
    engine.shutdown().await;

    let total = catalog::default_sources().len();
    let view = engine.set_all_active(true).await;
    assert_eq!(view.active_count, total);
    assert_eq!(engine.running_timers().await, total);

    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(engine.ticks_total(), 3 * total as u64);
    for id in ["eq", "reverb", "bitcoin", "drums"] {
        let source = engine.source(id).await.unwrap();
        assert!(source.active, "{id} active");
        assert!(
            source.counters.values().any(|v| *v > 0.0),
            "{id} ticked after restart"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn ticks_are_published_to_subscribers() {
    let engine = engine_with(vec![rig("btc", 10.0, 1.0)], 0.5);
    engine.toggle("btc").await.unwrap();
    let mut rx = engine.subscribe();

    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.sources.len(), 1);
    assert_close(snapshot.sources[0].counters["progress"], 1.0);
    assert_close(snapshot.mining.total_hash_rate, 5.0);
}
