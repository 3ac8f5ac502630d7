//! Events pushed to realtime subscribers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entities::AggregatedSummary;

/// A message on the realtime channel.
///
/// Serialized as `{"event": "<name>", "data": { ... }}` so browser clients
/// can dispatch on the event name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export, export_to = "bindings/")]
pub enum RealtimeEvent {
    /// A summary row appeared since the previous poll.
    #[serde(rename = "new-summary")]
    NewSummary(AggregatedSummary),
}

impl RealtimeEvent {
    /// The wire name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NewSummary(_) => "new-summary",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn new_summary_wire_shape() {
        let now = Utc::now();
        let event = RealtimeEvent::NewSummary(AggregatedSummary {
            id: 1,
            district: String::from("Dibrugarh"),
            date: now,
            hospital_case_count: 3,
            severe_case_count: 1,
            pharma_sales_count: 8,
            social_posts_count: 2,
            negative_posts_count: 1,
            outbreak_risk_score: 0.45,
            alert_level: Some(String::from("Medium")),
            created_at: now,
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
        assert_eq!(json["data"]["district"], "Dibrugarh");

        let back: RealtimeEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
