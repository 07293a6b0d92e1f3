use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::effect::ConsequenceEffect;
use super::reputation::ReputationTag;

/// Shift along the two alignment axes. Both values are usually small;
/// zero on an axis means no effect is produced for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEffect {
    pub law_chaos: f64,
    pub good_evil: f64,
}

/// One selectable response to a news event, as produced by the external
/// template layer. Resource and bloc effects arrive keyed by string;
/// validation happens in the calculator's base-extraction pass.
///
/// Maps are ordered so two calculations over the same option consume the
/// injected rng in the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub option_id: String,
    pub label: String,
    pub resource_effects: BTreeMap<String, f64>,
    pub voter_bloc_effects: BTreeMap<String, f64>,
    pub alignment_effect: AlignmentEffect,
    /// In `[0, 1]`; adjusted by staff quality before the roll.
    pub success_probability: f64,
}

impl ResponseOption {
    pub fn new(option_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            option_id: option_id.into(),
            label: label.into(),
            resource_effects: BTreeMap::new(),
            voter_bloc_effects: BTreeMap::new(),
            alignment_effect: AlignmentEffect::default(),
            success_probability: 0.5,
        }
    }

    /// Case-insensitive label match, used by outcome and chaining rules.
    pub fn label_contains(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Everything that follows from one chosen response: the roll, the
/// partitioned effects, reputation shifts, narrative strings, and
/// follow-up event gating. Created by the calculator, consumed exactly
/// once by the applicator, otherwise immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub event_id: String,
    pub option_id: String,
    pub is_success: bool,
    pub success_roll: f64,
    pub success_threshold: f64,
    pub immediate_effects: Vec<ConsequenceEffect>,
    /// Delayed, gradual, conditional, and permanent effects.
    pub delayed_effects: Vec<ConsequenceEffect>,
    pub reputation_changes: Vec<ReputationTag>,
    pub narrative: String,
    pub media_headline: String,
    pub unlocked_events: Vec<String>,
    pub blocked_events: Vec<String>,
}
