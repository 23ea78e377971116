// Domain models: metric sources, aggregates, studio state, snapshots

pub mod aggregate;
mod snapshot;
mod source;
pub mod studio;

pub use aggregate::{AggregateView, Performance};
pub use snapshot::DashboardSnapshot;
pub use source::{
    CounterKind, CounterSpec, Domain, MetricSource, Parameter, SourceSnapshot, Transition,
};
pub use studio::{
    Clip, ClipPosition, PlacedClip, Timeline, TimelineCommand, TimelineView, Transport,
    TransportCommand, format_time,
};
