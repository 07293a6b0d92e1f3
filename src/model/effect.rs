use serde::{Deserialize, Serialize};

use super::resource::ResourceType;

/// When an effect lands relative to the turn it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Applied in full when the response result is consumed.
    Immediate,
    /// Applied in full after `delay_turns` turn boundaries.
    Delayed,
    /// Applied in even slices across `duration_turns` turns.
    Gradual,
    /// Scheduled like `Delayed`; reserved for template data that gates an
    /// effect on a future condition.
    Conditional,
    /// Applied once on receipt and never subject to decay.
    Permanent,
}

/// One recorded scaling step, kept for explainability and test assertions.
/// The trail is additive metadata; it is never read back by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub label: String,
    pub factor: f64,
}

/// A single scheduled or immediate numeric change to one resource.
///
/// The magnitude is refined in place as the pipeline runs:
/// `base_magnitude` comes straight from template data, `scaled_magnitude`
/// accumulates every contextual multiplier, and `actual_applied` is the
/// clamped post-roll value — the only one ever written to game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsequenceEffect {
    pub resource: ResourceType,
    pub effect_type: EffectType,
    pub base_magnitude: f64,
    pub scaled_magnitude: f64,
    pub actual_applied: f64,
    /// Turns before a `Delayed`/`Conditional` effect fires.
    pub delay_turns: u32,
    /// Total span of a `Gradual` effect.
    pub duration_turns: u32,
    /// Countdown for an active `Gradual` effect.
    pub turns_remaining: u32,
    /// Required when `resource` is `VoterBlocSupport`.
    pub target_bloc: Option<String>,
    pub is_applied: bool,
    pub is_expired: bool,
    /// Turn number stamped when the effect was applied.
    pub applied_at: Option<u32>,
    pub modifiers: Vec<Modifier>,
}

impl ConsequenceEffect {
    pub fn new(resource: ResourceType, effect_type: EffectType, base_magnitude: f64) -> Self {
        Self {
            resource,
            effect_type,
            base_magnitude,
            scaled_magnitude: base_magnitude,
            actual_applied: 0.0,
            delay_turns: 0,
            duration_turns: 0,
            turns_remaining: 0,
            target_bloc: None,
            is_applied: false,
            is_expired: false,
            applied_at: None,
            modifiers: Vec::new(),
        }
    }

    pub fn with_delay(mut self, delay_turns: u32) -> Self {
        self.delay_turns = delay_turns;
        self
    }

    pub fn with_duration(mut self, duration_turns: u32) -> Self {
        self.duration_turns = duration_turns;
        self
    }

    pub fn with_target_bloc(mut self, bloc: impl Into<String>) -> Self {
        self.target_bloc = Some(bloc.into());
        self
    }

    /// Multiply the scaled magnitude and record the step in the trail.
    pub fn apply_modifier(&mut self, label: impl Into<String>, factor: f64) {
        self.scaled_magnitude *= factor;
        self.modifiers.push(Modifier {
            label: label.into(),
            factor,
        });
    }

    /// Look up a recorded factor by label.
    pub fn modifier(&self, label: &str) -> Option<f64> {
        self.modifiers
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.factor)
    }

    /// Build the synthetic one-turn record for a gradual slice. The slice
    /// is its own short-lived effect so the original is never re-applied.
    pub fn slice(&self, magnitude: f64, turn: u32) -> ConsequenceEffect {
        ConsequenceEffect {
            resource: self.resource,
            effect_type: EffectType::Immediate,
            base_magnitude: magnitude,
            scaled_magnitude: magnitude,
            actual_applied: magnitude,
            delay_turns: 0,
            duration_turns: 0,
            turns_remaining: 0,
            target_bloc: self.target_bloc.clone(),
            is_applied: true,
            is_expired: false,
            applied_at: Some(turn),
            modifiers: vec![Modifier {
                label: "gradual_slice".to_string(),
                factor: 1.0 / self.duration_turns.max(1) as f64,
            }],
        }
    }
}
