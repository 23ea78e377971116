// Shared test helpers

#![allow(dead_code)]

use simdash::catalog;
use simdash::dashboard::Dashboard;
use simdash::engine::Engine;
use simdash::models::{CounterSpec, Domain, MetricSource, Timeline};
use simdash::rng::SequenceRandom;

pub const EPS: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// Mining-style source: wrapping progress, unbounded hash rate, block events.
pub fn rig(id: &str, hash_step: f64, profit: f64) -> MetricSource {
    MetricSource::new(id, id, Domain::Mining)
        .with_profit(profit)
        .with_counter(catalog::PROGRESS)
        .with_counter(CounterSpec::volatile("hashRate", hash_step))
        .with_counter(catalog::BLOCKS)
}

pub fn default_board() -> Dashboard {
    Dashboard::new(
        catalog::default_sources(),
        Timeline::new(catalog::demo_clips()),
    )
}

pub fn board_with(sources: Vec<MetricSource>) -> Dashboard {
    Dashboard::new(sources, Timeline::new(catalog::demo_clips()))
}

/// Engine over `sources` where every draw returns `draw`.
pub fn engine_with(sources: Vec<MetricSource>, draw: f64) -> Engine {
    Engine::new(
        board_with(sources),
        Box::new(SequenceRandom::constant(draw)),
        64,
    )
}

pub fn default_engine() -> Engine {
    Engine::new(default_board(), Box::new(SequenceRandom::constant(0.5)), 64)
}
