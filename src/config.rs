use serde::{Deserialize, Serialize};

/// Tuning values for the consequence pipeline.
///
/// Passed by value and never mutated after construction; the defaults are
/// the reference balance point that the test suite pins down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsequenceConfig {
    /// Hard cap on any single effect magnitude after the success roll.
    pub max_single_effect_magnitude: f64,
    /// Effects smaller than this in absolute value are dropped as no-ops.
    pub minimum_effect_threshold: f64,
    /// Global amplifier applied while chaos mode is enabled.
    pub chaos_mode_multiplier: f64,
    /// Positive effects scale up by this on a successful response.
    pub crisis_success_bonus: f64,
    /// Negative effects scale up by this on a failed response.
    pub crisis_failure_penalty: f64,
    /// Negative effects scale down by this on a successful response.
    pub success_negative_mitigation: f64,
    /// Positive effects scale down by this on a failed response.
    pub failure_positive_dampen: f64,
    /// Approval above this triggers diminishing returns on positive effects.
    pub high_approval_threshold: f64,
    pub diminishing_returns_factor: f64,
    /// Approval below this amplifies negative effects.
    pub critical_trust_threshold: f64,
    pub low_trust_amplification: f64,
    /// Per-point-of-strength weight of a matching reputation tag.
    pub reputation_tag_weight: f64,
    /// Blend weights when a real-world polling signal is present.
    pub game_state_weight: f64,
    pub real_poll_weight: f64,
    /// Staff quality shifts the success threshold by `(quality - 0.5)` times this.
    pub staff_quality_swing: f64,
    /// Success threshold clamp bounds.
    pub min_success_threshold: f64,
    pub max_success_threshold: f64,
    /// Follow-up event chances.
    pub retaliation_chance: f64,
    pub escalation_chance: f64,
    pub opportunity_chance: f64,
}

impl Default for ConsequenceConfig {
    fn default() -> Self {
        Self {
            max_single_effect_magnitude: 0.3,
            minimum_effect_threshold: 0.01,
            chaos_mode_multiplier: 1.5,
            crisis_success_bonus: 1.5,
            crisis_failure_penalty: 2.0,
            success_negative_mitigation: 0.5,
            failure_positive_dampen: 0.3,
            high_approval_threshold: 0.7,
            diminishing_returns_factor: 0.8,
            critical_trust_threshold: 0.3,
            low_trust_amplification: 1.2,
            reputation_tag_weight: 0.2,
            game_state_weight: 0.7,
            real_poll_weight: 0.3,
            staff_quality_swing: 0.2,
            min_success_threshold: 0.1,
            max_success_threshold: 0.95,
            retaliation_chance: 0.30,
            escalation_chance: 0.40,
            opportunity_chance: 0.25,
        }
    }
}

/// Turn-scheduling and cross-turn decay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalConfig {
    pub trust_decay_per_turn: f64,
    pub media_decay_per_turn: f64,
    pub voter_bloc_decay_per_turn: f64,
    /// Fixed duration of voter-bloc effects, in turns.
    pub voter_bloc_effect_duration: u32,
    /// Per-category stance history cap; oldest records are trimmed first.
    pub stance_history_cap: usize,
    /// Election pressure kicks in below this many turns until election.
    pub election_window: u32,
    /// Scaling grows by this per turn inside the window.
    pub election_proximity_step: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            trust_decay_per_turn: 0.02,
            media_decay_per_turn: 0.1,
            voter_bloc_decay_per_turn: 0.03,
            voter_bloc_effect_duration: 3,
            stance_history_cap: 50,
            election_window: 5,
            election_proximity_step: 0.1,
        }
    }
}
