use rand::{Rng, RngCore};

use crate::config::{ConsequenceConfig, TemporalConfig};
use crate::model::{
    ConsequenceEffect, EffectType, EventType, NewsGameEvent, ReputationTag, ResourceType,
    ResponseOption, ResponseResult,
};

use super::context::ConsequenceContext;
use super::narrative;

// Reputation rule table. Strengths and durations are part of the rule
// identity, not balance knobs, so they live here rather than in config.
const CRISIS_HANDLER: (&str, f64, i32, &str) = ("crisis_handler", 0.3, 20, "crisis");
const CRISIS_FUMBLER: (&str, f64, i32, &str) = ("crisis_fumbler", -0.3, 15, "crisis");
const CREDIBILITY_ISSUE: (&str, f64, i32, &str) = ("credibility_issue", -0.4, 25, "scandal");
const STRAIGHT_SHOOTER: (&str, f64, i32, &str) = ("straight_shooter", 0.25, 20, "scandal");

/// Direction a new effect implies on the event's issue, for consistency
/// scoring against stance history.
const IMPLIED_STANCE_MAGNITUDE: f64 = 0.5;

/// Turns an event, a chosen response, and the current standing into a
/// `ResponseResult`. Pure: no shared state is touched, and all randomness
/// comes from the injected rng.
///
/// The magnitude pipeline runs five passes over the full effect list:
/// base extraction, context scaling, character modifiers, polling
/// blending, and the success roll. Every multiplicative factor is
/// recorded in the effect's modifier trail.
pub struct ConsequenceCalculator {
    config: ConsequenceConfig,
    temporal: TemporalConfig,
}

impl ConsequenceCalculator {
    pub fn new(config: ConsequenceConfig, temporal: TemporalConfig) -> Self {
        Self { config, temporal }
    }

    pub fn config(&self) -> &ConsequenceConfig {
        &self.config
    }

    /// Rng draw order: success roll first, then chaining rolls in rule
    /// order. Fixed inputs plus a fixed rng sequence reproduce the result
    /// bit for bit.
    pub fn calculate(
        &self,
        event: &NewsGameEvent,
        response: &ResponseOption,
        ctx: &ConsequenceContext<'_>,
        rng: &mut dyn RngCore,
    ) -> ResponseResult {
        let mut effects = self.extract_base_effects(response);
        self.scale_for_context(&mut effects, event, ctx);
        self.apply_character_modifiers(&mut effects, event, ctx);
        self.blend_polling(&mut effects, ctx);
        let (is_success, roll, threshold) = self.resolve_outcome(&mut effects, response, ctx, rng);

        let reputation_changes = reputation_rules(event, response, is_success);
        let (unlocked_events, blocked_events) =
            self.chain_events(event, response, is_success, rng);

        let narrative = narrative::response_narrative(event, response, is_success, ctx);
        let media_headline = narrative::media_headline(event, response, is_success, ctx);

        let (immediate_effects, delayed_effects): (Vec<_>, Vec<_>) = effects
            .into_iter()
            .partition(|e| e.effect_type == EffectType::Immediate);

        ResponseResult {
            event_id: event.event_id.clone(),
            option_id: response.option_id.clone(),
            is_success,
            success_roll: roll,
            success_threshold: threshold,
            immediate_effects,
            delayed_effects,
            reputation_changes,
            narrative,
            media_headline,
            unlocked_events,
            blocked_events,
        }
    }

    /// Pass 1: template data to effect records. Unknown resource keys are
    /// skipped here, the validating boundary for string-keyed data.
    fn extract_base_effects(&self, response: &ResponseOption) -> Vec<ConsequenceEffect> {
        let mut effects = Vec::new();

        for (key, &magnitude) in &response.resource_effects {
            let Some(resource) = ResourceType::parse(key) else {
                tracing::warn!(%key, option = %response.option_id, "unknown resource key in response");
                continue;
            };
            if resource == ResourceType::VoterBlocSupport {
                // Bloc support needs a target; it belongs in voter_bloc_effects.
                tracing::warn!(option = %response.option_id, "voter_bloc_support in resource map has no target bloc");
                continue;
            }
            effects.push(ConsequenceEffect::new(
                resource,
                EffectType::Immediate,
                magnitude,
            ));
        }

        for (bloc, &magnitude) in &response.voter_bloc_effects {
            effects.push(
                ConsequenceEffect::new(ResourceType::VoterBlocSupport, EffectType::Gradual, magnitude)
                    .with_duration(self.temporal.voter_bloc_effect_duration)
                    .with_target_bloc(bloc.clone()),
            );
        }

        let alignment = response.alignment_effect;
        if alignment.law_chaos != 0.0 {
            effects.push(ConsequenceEffect::new(
                ResourceType::AlignmentLawChaos,
                EffectType::Permanent,
                alignment.law_chaos,
            ));
        }
        if alignment.good_evil != 0.0 {
            effects.push(ConsequenceEffect::new(
                ResourceType::AlignmentGoodEvil,
                EffectType::Permanent,
                alignment.good_evil,
            ));
        }

        effects
    }

    /// Pass 2: situational scaling. All four factors are recorded even
    /// when neutral, except chaos which only exists while enabled.
    fn scale_for_context(
        &self,
        effects: &mut [ConsequenceEffect],
        event: &NewsGameEvent,
        ctx: &ConsequenceContext<'_>,
    ) {
        let tier = office_tier_factor(ctx.office_tier);
        let urgency = event.urgency.scale_factor();
        let election = self.election_proximity_factor(ctx.turns_until_election);

        for effect in effects.iter_mut() {
            effect.apply_modifier("office_tier", tier);
            effect.apply_modifier("urgency", urgency);
            effect.apply_modifier("election_proximity", election);
            if ctx.chaos_mode {
                effect.apply_modifier("chaos_mode", self.config.chaos_mode_multiplier);
            }
        }
    }

    /// Pass 3: who the player is and how they have behaved. High-approval
    /// diminishing returns, low-trust amplification, matching reputation
    /// tags, and stance-history consistency.
    fn apply_character_modifiers(
        &self,
        effects: &mut [ConsequenceEffect],
        event: &NewsGameEvent,
        ctx: &ConsequenceContext<'_>,
    ) {
        for effect in effects.iter_mut() {
            if ctx.approval > self.config.high_approval_threshold && effect.scaled_magnitude > 0.0 {
                effect.apply_modifier("diminishing_returns", self.config.diminishing_returns_factor);
            }
            if ctx.approval < self.config.critical_trust_threshold && effect.scaled_magnitude < 0.0 {
                effect.apply_modifier("low_trust_amplification", self.config.low_trust_amplification);
            }

            for tag in ctx.reputation_tags {
                let factor = tag.scaling_factor(effect.resource, self.config.reputation_tag_weight);
                if factor != 1.0 {
                    effect.apply_modifier(format!("reputation:{}", tag.name), factor);
                }
            }

            let implied = if effect.base_magnitude >= 0.0 {
                IMPLIED_STANCE_MAGNITUDE
            } else {
                -IMPLIED_STANCE_MAGNITUDE
            };
            let consistency = ctx.stance_history.consistency_score(&event.category, implied);
            if consistency != 1.0 {
                effect.apply_modifier("stance_consistency", consistency);
            }
        }
    }

    /// Pass 4: blend in a real-world polling signal where one is present.
    /// Only opinion-shaped resources participate.
    fn blend_polling(&self, effects: &mut [ConsequenceEffect], ctx: &ConsequenceContext<'_>) {
        let Some(signal) = ctx.poll_signal else {
            return;
        };
        let factor = self.config.game_state_weight + signal * self.config.real_poll_weight;
        for effect in effects.iter_mut() {
            if matches!(
                effect.resource,
                ResourceType::PublicTrust | ResourceType::VoterBlocSupport
            ) {
                effect.apply_modifier("polling", factor);
            }
        }
    }

    /// Pass 5: the roll. Success softens downsides and boosts upsides;
    /// failure does the reverse, harder. The clamp afterwards is what
    /// keeps arbitrarily tall multiplier stacks recoverable.
    fn resolve_outcome(
        &self,
        effects: &mut [ConsequenceEffect],
        response: &ResponseOption,
        ctx: &ConsequenceContext<'_>,
        rng: &mut dyn RngCore,
    ) -> (bool, f64, f64) {
        let staff_adjust = (ctx.staff_quality - 0.5) * self.config.staff_quality_swing;
        let threshold = (response.success_probability + staff_adjust)
            .clamp(self.config.min_success_threshold, self.config.max_success_threshold);
        let roll: f64 = rng.random();
        let is_success = roll <= threshold;

        for effect in effects.iter_mut() {
            let factor = match (is_success, effect.scaled_magnitude > 0.0) {
                (true, true) => self.config.crisis_success_bonus,
                (true, false) => self.config.success_negative_mitigation,
                (false, true) => self.config.failure_positive_dampen,
                (false, false) => self.config.crisis_failure_penalty,
            };
            effect.apply_modifier(if is_success { "outcome_success" } else { "outcome_failure" }, factor);

            let max = self.config.max_single_effect_magnitude;
            let unclamped = effect.scaled_magnitude;
            effect.actual_applied = unclamped.clamp(-max, max);
            if effect.actual_applied != unclamped {
                // Recorded so the trail still multiplies out to actual.
                effect.apply_modifier("magnitude_clamp", effect.actual_applied / unclamped);
            }
        }

        (is_success, roll, threshold)
    }

    fn election_proximity_factor(&self, turns_until_election: u32) -> f64 {
        if turns_until_election < self.temporal.election_window {
            1.0 + (self.temporal.election_window - turns_until_election) as f64
                * self.temporal.election_proximity_step
        } else {
            1.0
        }
    }

    /// Follow-up event gating. Aggressive labels can provoke retaliation;
    /// crises escalate on failure and open doors on success; scandal
    /// outcomes hinge on whether the player denied or came clean.
    fn chain_events(
        &self,
        event: &NewsGameEvent,
        response: &ResponseOption,
        is_success: bool,
        rng: &mut dyn RngCore,
    ) -> (Vec<String>, Vec<String>) {
        let mut unlocked = Vec::new();
        let mut blocked = Vec::new();

        if (response.label_contains("attack") || response.label_contains("counter"))
            && rng.random_bool(self.config.retaliation_chance)
        {
            unlocked.push(format!("retaliation_{}", event.event_id));
        }

        match (event.event_type, is_success) {
            (EventType::Crisis, false) => {
                if rng.random_bool(self.config.escalation_chance) {
                    unlocked.push(format!("escalation_{}", event.event_id));
                }
            }
            (EventType::Crisis, true) => {
                if rng.random_bool(self.config.opportunity_chance) {
                    unlocked.push(format!("opportunity_{}", event.category));
                }
            }
            (EventType::Scandal, false) => {
                if response.label_contains("deny") {
                    unlocked.push(format!("investigation_{}", event.event_id));
                }
            }
            (EventType::Scandal, true) => {
                if response.label_contains("admit") {
                    blocked.push(format!("scandal_{}", event.category));
                }
            }
            _ => {}
        }

        (unlocked, blocked)
    }
}

/// Office tier 1 (local) halves magnitudes; tier 5 (national) adds half.
fn office_tier_factor(tier: u8) -> f64 {
    0.5 + (tier.clamp(1, 5) - 1) as f64 * 0.25
}

/// Deterministic rule-based reputation changes; no randomness so the same
/// outcome always earns the same label.
fn reputation_rules(
    event: &NewsGameEvent,
    response: &ResponseOption,
    is_success: bool,
) -> Vec<ReputationTag> {
    let mut tags = Vec::new();

    match (event.event_type, is_success) {
        (EventType::Crisis, true) => tags.push(tag_from(CRISIS_HANDLER)),
        (EventType::Crisis, false) => tags.push(tag_from(CRISIS_FUMBLER)),
        (EventType::Scandal, true) if response.label_contains("admit") => {
            tags.push(tag_from(STRAIGHT_SHOOTER));
        }
        _ => {}
    }

    if !is_success && response.label_contains("deny") {
        tags.push(tag_from(CREDIBILITY_ISSUE));
    }

    tags
}

fn tag_from((name, strength, duration, category): (&str, f64, i32, &str)) -> ReputationTag {
    ReputationTag::new(name, strength, duration, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_tier_factor_is_linear_and_clamped() {
        assert_eq!(office_tier_factor(1), 0.5);
        assert_eq!(office_tier_factor(2), 0.75);
        assert_eq!(office_tier_factor(3), 1.0);
        assert_eq!(office_tier_factor(4), 1.25);
        assert_eq!(office_tier_factor(5), 1.5);
        // Out-of-range tiers clamp instead of extrapolating.
        assert_eq!(office_tier_factor(0), 0.5);
        assert_eq!(office_tier_factor(9), 1.5);
    }

    #[test]
    fn election_factor_grows_inside_window() {
        let calc = ConsequenceCalculator::new(
            ConsequenceConfig::default(),
            TemporalConfig::default(),
        );
        assert_eq!(calc.election_proximity_factor(10), 1.0);
        assert_eq!(calc.election_proximity_factor(5), 1.0);
        assert!((calc.election_proximity_factor(4) - 1.1).abs() < 1e-12);
        assert!((calc.election_proximity_factor(1) - 1.4).abs() < 1e-12);
        assert!((calc.election_proximity_factor(0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn crisis_reputation_rules() {
        let event = NewsGameEvent::new(
            "ev_1",
            "Refinery fire",
            "energy",
            EventType::Crisis,
            crate::model::UrgencyLevel::Breaking,
        );
        let response = ResponseOption::new("opt_1", "Coordinate the response");

        let tags = reputation_rules(&event, &response, true);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "crisis_handler");
        assert_eq!(tags[0].duration_turns, 20);

        let tags = reputation_rules(&event, &response, false);
        assert_eq!(tags[0].name, "crisis_fumbler");
        assert_eq!(tags[0].duration_turns, 15);
    }

    #[test]
    fn failed_denial_earns_credibility_issue() {
        let event = NewsGameEvent::new(
            "ev_2",
            "Donor records leak",
            "ethics",
            EventType::Scandal,
            crate::model::UrgencyLevel::Urgent,
        );
        let response = ResponseOption::new("opt_1", "Deny the allegations");
        let tags = reputation_rules(&event, &response, false);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "credibility_issue");
        assert_eq!(tags[0].strength, -0.4);
        assert_eq!(tags[0].duration_turns, 25);
    }

    #[test]
    fn successful_admission_earns_straight_shooter() {
        let event = NewsGameEvent::new(
            "ev_3",
            "Expense report questions",
            "ethics",
            EventType::Scandal,
            crate::model::UrgencyLevel::Developing,
        );
        let response = ResponseOption::new("opt_1", "Admit the mistake");
        let tags = reputation_rules(&event, &response, true);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "straight_shooter");
    }
}
