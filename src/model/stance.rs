use serde::{Deserialize, Serialize};

/// A logged position on an issue category, public or private.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceRecord {
    pub category: String,
    /// Human-readable label of the position taken.
    pub stance: String,
    /// Direction and conviction, in `[-1, 1]`.
    pub strength: f64,
    pub turn: u32,
    pub source_event_id: String,
    /// Only public records count toward consistency scoring.
    pub was_public: bool,
}

impl StanceRecord {
    pub fn new(
        category: impl Into<String>,
        stance: impl Into<String>,
        strength: f64,
        turn: u32,
        source_event_id: impl Into<String>,
        was_public: bool,
    ) -> Self {
        Self {
            category: category.into(),
            stance: stance.into(),
            strength: strength.clamp(-1.0, 1.0),
            turn,
            source_event_id: source_event_id.into(),
            was_public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_clamped() {
        let record = StanceRecord::new("economy", "Tax cuts now", 1.7, 3, "ev_1", true);
        assert_eq!(record.strength, 1.0);
    }

    #[test]
    fn serde_round_trip() {
        let record = StanceRecord::new("healthcare", "Expand coverage", 0.6, 12, "ev_9", false);
        let json = serde_json::to_string(&record).unwrap();
        let parsed: StanceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
