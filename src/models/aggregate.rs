// Cross-source summaries. Pure functions of the current source set.
//
// Hash rates are summed as-is: TH/s, MH/s and GH/s sources are added together
// without normalization. Consumers that need comparable figures must convert
// using each source's unit.

use serde::{Deserialize, Serialize};

use super::MetricSource;

pub const HASH_RATE: &str = "hashRate";

/// Number of sources with `active == true`.
pub fn active_count<'a>(sources: impl IntoIterator<Item = &'a MetricSource>) -> usize {
    sources.into_iter().filter(|s| s.is_active()).count()
}

/// Sum of the static profit figure of every active source.
pub fn total_profit<'a>(sources: impl IntoIterator<Item = &'a MetricSource>) -> f64 {
    sources
        .into_iter()
        .filter(|s| s.is_active())
        .map(MetricSource::profit)
        .sum()
}

/// Sum of the live hash-rate counter across all sources (idle sources sit at 0).
pub fn total_hash_rate<'a>(sources: impl IntoIterator<Item = &'a MetricSource>) -> f64 {
    sources.into_iter().map(|s| s.counter(HASH_RATE)).sum()
}

/// Sum of `counters[name]` over active sources.
pub fn total_of_counter<'a>(
    sources: impl IntoIterator<Item = &'a MetricSource>,
    name: &str,
) -> f64 {
    sources
        .into_iter()
        .filter(|s| s.is_active())
        .map(|s| s.counter(name))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Performance {
    Optimal,
    Idle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateView {
    pub active_count: usize,
    pub total_sources: usize,
    pub total_profit: f64,
    pub total_hash_rate: f64,
    pub performance: Performance,
}

impl AggregateView {
    pub fn compute<'a>(sources: impl IntoIterator<Item = &'a MetricSource> + Clone) -> Self {
        let active = active_count(sources.clone());
        Self {
            active_count: active,
            total_sources: sources.clone().into_iter().count(),
            total_profit: total_profit(sources.clone()),
            total_hash_rate: total_hash_rate(sources),
            performance: if active > 0 {
                Performance::Optimal
            } else {
                Performance::Idle
            },
        }
    }

    pub fn all_active(&self) -> bool {
        self.active_count == self.total_sources
    }
}
