// Full dashboard snapshot broadcast to WebSocket clients after every change

use serde::{Deserialize, Serialize};

use super::{AggregateView, SourceSnapshot, TimelineView, Transport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Unix millis at publication.
    pub timestamp: i64,
    pub sources: Vec<SourceSnapshot>,
    /// Aggregate over the mining rigs.
    pub mining: AggregateView,
    /// Aggregate over mixer tracks and effects.
    pub studio: AggregateView,
    pub transport: Transport,
    pub position_label: String,
    pub timeline: TimelineView,
}
