use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::StanceRecord;

/// Both stances must be at least this strong for a reversal to register
/// as a flip-flop.
const FLIP_FLOP_THRESHOLD: f64 = 0.3;

/// Bucketed consistency multiplier for a deviation from the historical
/// average stance. Small deviations are rewarded, large ones punished.
pub fn consistency_multiplier(deviation: f64) -> f64 {
    if deviation < 0.2 {
        1.1
    } else if deviation < 0.5 {
        1.0
    } else if deviation < 1.0 {
        0.85
    } else {
        0.7
    }
}

/// Records the positions a player has taken per issue category and scores
/// how consistent a new position would be with that history.
///
/// Histories are append-only and capped per category; once the cap is
/// reached the oldest records are evicted first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StanceHistoryTracker {
    records: BTreeMap<String, Vec<StanceRecord>>,
    cap: usize,
}

impl Default for StanceHistoryTracker {
    fn default() -> Self {
        Self::new(50)
    }
}

impl StanceHistoryTracker {
    pub fn new(cap: usize) -> Self {
        Self {
            records: BTreeMap::new(),
            cap: cap.max(1),
        }
    }

    pub fn record_stance(&mut self, record: StanceRecord) {
        let list = self.records.entry(record.category.clone()).or_default();
        list.push(record);
        if list.len() > self.cap {
            let excess = list.len() - self.cap;
            list.drain(..excess);
        }
    }

    /// All records for a category, oldest first.
    pub fn records(&self, category: &str) -> &[StanceRecord] {
        self.records.get(category).map_or(&[], Vec::as_slice)
    }

    /// Mean strength of public records for a category. `None` when the
    /// player has never gone on the record.
    pub fn historical_position(&self, category: &str) -> Option<f64> {
        let strengths: Vec<f64> = self
            .records
            .get(category)?
            .iter()
            .filter(|r| r.was_public)
            .map(|r| r.strength)
            .collect();
        if strengths.is_empty() {
            None
        } else {
            Some(strengths.iter().sum::<f64>() / strengths.len() as f64)
        }
    }

    /// Consistency multiplier for taking a position of `proposed_strength`
    /// on `category`. No public history is neutral.
    pub fn consistency_score(&self, category: &str, proposed_strength: f64) -> f64 {
        match self.historical_position(category) {
            Some(mean) => consistency_multiplier((mean - proposed_strength).abs()),
            None => 1.0,
        }
    }

    /// Returns the stance being reversed when the proposed position flips
    /// the sign of the most recent public record and both positions are
    /// strong enough to be meaningful.
    pub fn flip_flop(&self, category: &str, proposed_strength: f64) -> Option<&StanceRecord> {
        let latest = self
            .records
            .get(category)?
            .iter()
            .rev()
            .find(|r| r.was_public)?;
        let reversed = latest.strength * proposed_strength < 0.0;
        if reversed
            && latest.strength.abs() > FLIP_FLOP_THRESHOLD
            && proposed_strength.abs() > FLIP_FLOP_THRESHOLD
        {
            Some(latest)
        } else {
            None
        }
    }
}
