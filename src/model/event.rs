use serde::{Deserialize, Serialize};

/// Broad classification of a news event, driving outcome rules and
/// follow-up chaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Crisis,
    Scandal,
    Policy,
    Opportunity,
    Gaffe,
}

/// Per-event speed/severity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Breaking,
    Urgent,
    Developing,
    Informational,
}

impl UrgencyLevel {
    /// Magnitude multiplier for this urgency.
    pub fn scale_factor(self) -> f64 {
        match self {
            UrgencyLevel::Breaking => 1.5,
            UrgencyLevel::Urgent => 1.25,
            UrgencyLevel::Developing => 1.0,
            UrgencyLevel::Informational => 0.75,
        }
    }
}

/// Media lifecycle stage assigned by the external news-cycle scheduler.
/// Consumed here only through its urgency mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCycleStage {
    Breaking,
    Developing,
    Ongoing,
    Fading,
}

impl NewsCycleStage {
    /// An ongoing story still commands more attention than a fading one.
    pub fn urgency(self) -> UrgencyLevel {
        match self {
            NewsCycleStage::Breaking => UrgencyLevel::Breaking,
            NewsCycleStage::Developing => UrgencyLevel::Developing,
            NewsCycleStage::Ongoing => UrgencyLevel::Urgent,
            NewsCycleStage::Fading => UrgencyLevel::Informational,
        }
    }
}

/// One political news event, as produced by the external template layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsGameEvent {
    pub event_id: String,
    pub headline: String,
    /// Issue category (e.g. "healthcare", "economy"); keys stance history.
    pub category: String,
    pub event_type: EventType,
    pub urgency: UrgencyLevel,
}

impl NewsGameEvent {
    pub fn new(
        event_id: impl Into<String>,
        headline: impl Into<String>,
        category: impl Into<String>,
        event_type: EventType,
        urgency: UrgencyLevel,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            headline: headline.into(),
            category: category.into(),
            event_type,
            urgency,
        }
    }
}
