// Static source tables the dashboards start from

use crate::models::{Clip, CounterSpec, Domain, MetricSource, Parameter};

/// Fixed tick cadence for every active source.
pub const TICK_INTERVAL_MS: u64 = 1000;

pub const PROGRESS: CounterSpec = CounterSpec::wrapping("progress", 2.0, 100.0);
pub const BLOCKS: CounterSpec = CounterSpec::event("blocks", 0.1);
pub const LEVEL: CounterSpec = CounterSpec::wrapping("level", 5.0, 100.0);
pub const PEAKS: CounterSpec = CounterSpec::event("peaks", 0.1);
pub const LOAD: CounterSpec = CounterSpec::wrapping("load", 2.0, 100.0);

struct Rig {
    id: &'static str,
    name: &'static str,
    unit: &'static str,
    hash_step: f64,
    profit: f64,
}

const RIGS: [Rig; 4] = [
    Rig {
        id: "bitcoin",
        name: "Bitcoin",
        unit: "TH/s",
        hash_step: 10.0,
        profit: 12.45,
    },
    Rig {
        id: "ethereum",
        name: "Ethereum",
        unit: "MH/s",
        hash_step: 5.0,
        profit: 8.32,
    },
    Rig {
        id: "kaspa",
        name: "Kaspa",
        unit: "GH/s",
        hash_step: 3.0,
        profit: 5.67,
    },
    Rig {
        id: "dogecoin",
        name: "Dogecoin",
        unit: "MH/s",
        hash_step: 2.0,
        profit: 3.21,
    },
];

pub fn mining_rigs() -> Vec<MetricSource> {
    RIGS.iter()
        .map(|rig| {
            MetricSource::new(rig.id, rig.name, Domain::Mining)
                .with_unit(rig.unit)
                .with_profit(rig.profit)
                .with_counter(PROGRESS)
                .with_counter(CounterSpec::volatile(
                    crate::models::aggregate::HASH_RATE,
                    rig.hash_step,
                ))
                .with_counter(BLOCKS)
        })
        .collect()
}

// (id, name, volume, pan)
const TRACKS: [(&str, &str, f64, f64); 5] = [
    ("drums", "Drums", 80.0, 0.0),
    ("bass", "Bass", 70.0, -20.0),
    ("guitar", "Guitar", 75.0, 15.0),
    ("vocals", "Vocals", 85.0, 0.0),
    ("synth", "Synth", 65.0, 10.0),
];

pub fn mixer_tracks() -> Vec<MetricSource> {
    TRACKS
        .iter()
        .map(|&(id, name, volume, pan)| {
            MetricSource::new(id, name, Domain::Track)
                .with_counter(LEVEL)
                .with_counter(PEAKS)
                .with_parameter("volume", Parameter::new(volume, 0.0, 100.0))
                .with_parameter("pan", Parameter::new(pan, -50.0, 50.0))
                .with_parameter("muted", Parameter::switch(false))
                .with_parameter("solo", Parameter::switch(false))
        })
        .collect()
}

/// Slider range the rack uses for an effect parameter.
fn effect_range(key: &str) -> (f64, f64) {
    match key {
        "threshold" => (-60.0, 0.0),
        "time" => (0.0, 1000.0),
        _ => (0.0, 100.0),
    }
}

// (id, name, enabled at start, parameters)
type EffectRow = (
    &'static str,
    &'static str,
    bool,
    &'static [(&'static str, f64)],
);

const EFFECTS: [EffectRow; 5] = [
    ("eq", "EQ", true, &[("low", 0.0), ("mid", 0.0), ("high", 0.0)]),
    (
        "compressor",
        "Compressor",
        false,
        &[
            ("threshold", -12.0),
            ("ratio", 4.0),
            ("attack", 10.0),
            ("release", 100.0),
        ],
    ),
    (
        "reverb",
        "Reverb",
        true,
        &[
            ("roomSize", 50.0),
            ("damping", 30.0),
            ("wet", 25.0),
            ("dry", 75.0),
        ],
    ),
    (
        "delay",
        "Delay",
        false,
        &[("time", 250.0), ("feedback", 35.0), ("wet", 20.0)],
    ),
    (
        "distortion",
        "Distortion",
        false,
        &[("drive", 30.0), ("tone", 50.0), ("level", 80.0)],
    ),
];

pub fn effects_rack() -> Vec<MetricSource> {
    EFFECTS
        .iter()
        .map(|&(id, name, enabled, params)| {
            let mut source = params.iter().fold(
                MetricSource::new(id, name, Domain::Effect).with_counter(LOAD),
                |source, &(key, value)| {
                    let (min, max) = effect_range(key);
                    source.with_parameter(key, Parameter::new(value, min, max))
                },
            );
            if enabled {
                source.set_active(true);
            }
            source
        })
        .collect()
}

/// Every source both dashboards start with.
pub fn default_sources() -> Vec<MetricSource> {
    let mut sources = mining_rigs();
    sources.extend(mixer_tracks());
    sources.extend(effects_rack());
    sources
}

pub fn demo_clips() -> Vec<Clip> {
    [
        ("drums", "Kick Pattern", 0.0, 4.0),
        ("drums", "Fill", 8.0, 4.0),
        ("bass", "Bassline", 1.0, 7.0),
        ("guitar", "Rhythm Guitar", 2.0, 6.0),
        ("vocals", "Vocal Take 1", 16.0, 8.0),
        ("synth", "Lead Synth", 4.0, 4.0),
    ]
    .into_iter()
    .map(|(track_id, name, start, duration)| Clip {
        track_id: track_id.to_string(),
        name: name.to_string(),
        start,
        duration,
    })
    .collect()
}
