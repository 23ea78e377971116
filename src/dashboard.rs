// Single-owner dashboard state. Every mutation funnels through here; callers
// that schedule ticks act on the returned transitions.

use crate::error::EngineError;
use crate::models::{
    AggregateView, DashboardSnapshot, Domain, MetricSource, SourceSnapshot, Timeline, Transition,
    Transport,
};
use crate::rng::RandomSource;

#[derive(Debug, Clone)]
pub struct Dashboard {
    sources: Vec<MetricSource>,
    pub transport: Transport,
    pub timeline: Timeline,
}

impl Dashboard {
    pub fn new(sources: Vec<MetricSource>, timeline: Timeline) -> Self {
        Self {
            sources,
            transport: Transport::default(),
            timeline,
        }
    }

    pub fn sources(&self) -> &[MetricSource] {
        &self.sources
    }

    pub fn source(&self, id: &str) -> Result<&MetricSource, EngineError> {
        self.sources
            .iter()
            .find(|s| s.id() == id)
            .ok_or_else(|| EngineError::not_found(id))
    }

    fn source_mut(&mut self, id: &str) -> Result<&mut MetricSource, EngineError> {
        self.sources
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| EngineError::not_found(id))
    }

    /// Sources that are running and the epoch their ticker was started under.
    pub fn running(&self) -> Vec<(String, u64)> {
        self.sources
            .iter()
            .filter(|s| s.is_active())
            .map(|s| (s.id().to_string(), s.epoch()))
            .collect()
    }

    pub fn toggle(&mut self, id: &str) -> Result<Transition, EngineError> {
        Ok(self.source_mut(id)?.toggle())
    }

    /// Switches every source; returns only the sources whose flag changed.
    pub fn set_all_active(&mut self, active: bool) -> Vec<(String, Transition)> {
        self.set_active_where(active, |_| true)
    }

    pub fn set_domain_active(&mut self, domain: Domain, active: bool) -> Vec<(String, Transition)> {
        self.set_active_where(active, |s| s.domain() == domain)
    }

    fn set_active_where(
        &mut self,
        active: bool,
        filter: impl Fn(&MetricSource) -> bool,
    ) -> Vec<(String, Transition)> {
        self.sources
            .iter_mut()
            .filter(|s| filter(s))
            .filter_map(|s| {
                s.set_active(active)
                    .map(|transition| (s.id().to_string(), transition))
            })
            .collect()
    }

    /// Runs one tick for `id` if `epoch` is still current. Unknown ids count as stale.
    pub fn tick(&mut self, id: &str, epoch: u64, rng: &mut dyn RandomSource) -> bool {
        match self.source_mut(id) {
            Ok(source) => source.tick(epoch, rng),
            Err(_) => false,
        }
    }

    pub fn update_parameter(&mut self, id: &str, key: &str, value: f64) -> Result<(), EngineError> {
        self.source_mut(id)?.update_parameter(key, value)
    }

    pub fn aggregate(&self, domain: Domain) -> AggregateView {
        AggregateView::compute(self.sources.iter().filter(move |s| s.domain() == domain))
    }

    pub fn studio_aggregate(&self) -> AggregateView {
        AggregateView::compute(self.sources.iter().filter(|s| s.domain().is_studio()))
    }

    /// Aggregate over every source regardless of domain.
    pub fn aggregate_all(&self) -> AggregateView {
        AggregateView::compute(self.sources.iter())
    }

    pub fn source_snapshot(&self, id: &str) -> Result<SourceSnapshot, EngineError> {
        self.source(id).map(MetricSource::snapshot)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            timestamp: chrono::Utc::now().timestamp_millis(),
            sources: self.sources.iter().map(MetricSource::snapshot).collect(),
            mining: self.aggregate(Domain::Mining),
            studio: self.studio_aggregate(),
            transport: self.transport.clone(),
            position_label: self.transport.position_label(),
            timeline: self.timeline.view(),
        }
    }
}
