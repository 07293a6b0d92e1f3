use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::{ConsequenceConfig, TemporalConfig};
use crate::model::{ConsequenceEffect, EffectType, ReputationTag, ResourceType, ResponseResult};

use super::state::{ApplyError, GameStateModifier};

/// One entry in the structured outcome list a turn produces. Returned to
/// the caller instead of fired through callbacks, which keeps replay and
/// testing a matter of comparing lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// An effect (or a synthetic gradual slice) was written to game state.
    Applied { effect: ConsequenceEffect },
    /// A gradual effect finished its run and left the active list.
    Expired { effect: ConsequenceEffect },
    /// Baseline cross-turn decay.
    Decayed {
        resource: ResourceType,
        bloc: Option<String>,
        delta: f64,
    },
    /// A reputation change was forwarded to game state.
    TagAdded { tag: ReputationTag },
}

/// Outcome stamped with the turn it happened on; the applicator's ledger
/// is a flat list of these, suitable for JSONL export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub turn: u32,
    pub outcome: TurnOutcome,
}

/// Applies calculated consequences to game state on the right turns.
///
/// Owns the write boundary plus a FIFO queue of delayed effects and the
/// list of active gradual effects. Single-threaded by design: the
/// surrounding game loop guarantees one call site at a time, so there is
/// no internal locking.
///
/// Within one `process_turn` call the order is fixed: delayed resolution,
/// then gradual slicing, then baseline decay.
pub struct EffectApplicator<S: GameStateModifier> {
    state: S,
    config: ConsequenceConfig,
    temporal: TemporalConfig,
    queued: VecDeque<ConsequenceEffect>,
    active: Vec<ConsequenceEffect>,
    ledger: Vec<LedgerEntry>,
    turn: u32,
}

impl<S: GameStateModifier> EffectApplicator<S> {
    pub fn new(state: S, config: ConsequenceConfig, temporal: TemporalConfig) -> Self {
        Self {
            state,
            config,
            temporal,
            queued: VecDeque::new(),
            active: Vec::new(),
            ledger: Vec::new(),
            turn: 0,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Everything applied so far, in application order.
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    /// Effects waiting on their delay, FIFO.
    pub fn queued(&self) -> &VecDeque<ConsequenceEffect> {
        &self.queued
    }

    /// Gradual effects currently paying out.
    pub fn active(&self) -> &[ConsequenceEffect] {
        &self.active
    }

    /// Consume a calculation result: immediate and permanent effects land
    /// now, delayed effects join the queue, gradual effects start their
    /// run, and reputation changes are forwarded to game state.
    pub fn apply_response_result(
        &mut self,
        result: ResponseResult,
    ) -> Result<Vec<TurnOutcome>, ApplyError> {
        let mut outcomes = Vec::new();

        for mut effect in result.immediate_effects {
            if self.apply_effect(&mut effect)? {
                outcomes.push(TurnOutcome::Applied { effect });
            }
        }

        for mut effect in result.delayed_effects {
            if effect.actual_applied.abs() < self.config.minimum_effect_threshold {
                tracing::debug!(
                    resource = effect.resource.key(),
                    magnitude = effect.actual_applied,
                    "dropping sub-threshold scheduled effect"
                );
                continue;
            }
            match effect.effect_type {
                EffectType::Gradual => {
                    if effect.duration_turns == 0 {
                        tracing::warn!(
                            resource = effect.resource.key(),
                            "gradual effect with zero duration applied at once"
                        );
                        if self.apply_effect(&mut effect)? {
                            outcomes.push(TurnOutcome::Applied { effect });
                        }
                        continue;
                    }
                    effect.turns_remaining = effect.duration_turns;
                    self.active.push(effect);
                }
                EffectType::Delayed | EffectType::Conditional => {
                    self.queued.push_back(effect);
                }
                // Permanent alignment shifts have no decay channel to
                // wait out; stray immediates land here too.
                EffectType::Permanent | EffectType::Immediate => {
                    if self.apply_effect(&mut effect)? {
                        outcomes.push(TurnOutcome::Applied { effect });
                    }
                }
            }
        }

        for tag in result.reputation_changes {
            self.state.add_reputation_tag(tag.clone());
            outcomes.push(TurnOutcome::TagAdded { tag });
        }

        self.record(&outcomes);
        Ok(outcomes)
    }

    /// Write one effect to game state. No-op below the minimum threshold
    /// or when the effect already ran; returns whether it was applied.
    pub fn apply_effect(&mut self, effect: &mut ConsequenceEffect) -> Result<bool, ApplyError> {
        if effect.is_applied || effect.is_expired {
            return Ok(false);
        }
        if effect.actual_applied.abs() < self.config.minimum_effect_threshold {
            tracing::debug!(
                resource = effect.resource.key(),
                magnitude = effect.actual_applied,
                "dropping sub-threshold effect"
            );
            return Ok(false);
        }
        self.dispatch(effect.resource, effect.target_bloc.as_deref(), effect.actual_applied)?;
        effect.is_applied = true;
        effect.applied_at = Some(self.turn);
        Ok(true)
    }

    /// Advance one turn boundary: resolve due delayed effects, pay out
    /// gradual slices, then apply baseline decay.
    pub fn process_turn(&mut self) -> Result<Vec<TurnOutcome>, ApplyError> {
        self.turn += 1;
        let mut outcomes = Vec::new();

        // (a) Delayed effects count down; due ones fire in FIFO order.
        let queued: Vec<ConsequenceEffect> = self.queued.drain(..).collect();
        for mut effect in queued {
            effect.delay_turns = effect.delay_turns.saturating_sub(1);
            if effect.delay_turns == 0 {
                if self.apply_effect(&mut effect)? {
                    outcomes.push(TurnOutcome::Applied { effect });
                }
            } else {
                self.queued.push_back(effect);
            }
        }

        // (b) Gradual effects pay out one synthetic slice each.
        let mut still_active = Vec::with_capacity(self.active.len());
        for mut effect in std::mem::take(&mut self.active) {
            let slice = effect.actual_applied / f64::from(effect.duration_turns.max(1));
            self.dispatch(effect.resource, effect.target_bloc.as_deref(), slice)?;
            effect.turns_remaining -= 1;
            outcomes.push(TurnOutcome::Applied {
                effect: effect.slice(slice, self.turn),
            });
            if effect.turns_remaining == 0 {
                effect.is_expired = true;
                outcomes.push(TurnOutcome::Expired { effect });
            } else {
                still_active.push(effect);
            }
        }
        self.active = still_active;

        // (c) Baseline decay: attention and goodwill erode every turn.
        self.state.modify_trust(-self.temporal.trust_decay_per_turn);
        outcomes.push(TurnOutcome::Decayed {
            resource: ResourceType::PublicTrust,
            bloc: None,
            delta: -self.temporal.trust_decay_per_turn,
        });
        self.state
            .modify_media_influence(-self.temporal.media_decay_per_turn);
        outcomes.push(TurnOutcome::Decayed {
            resource: ResourceType::MediaInfluence,
            bloc: None,
            delta: -self.temporal.media_decay_per_turn,
        });
        for bloc in self.state.voter_blocs() {
            self.state
                .modify_voter_bloc_support(&bloc, -self.temporal.voter_bloc_decay_per_turn)?;
            outcomes.push(TurnOutcome::Decayed {
                resource: ResourceType::VoterBlocSupport,
                bloc: Some(bloc),
                delta: -self.temporal.voter_bloc_decay_per_turn,
            });
        }

        self.record(&outcomes);
        Ok(outcomes)
    }

    fn dispatch(
        &mut self,
        resource: ResourceType,
        bloc: Option<&str>,
        delta: f64,
    ) -> Result<(), ApplyError> {
        match resource {
            ResourceType::PublicTrust => self.state.modify_trust(delta),
            ResourceType::PoliticalCapital => self.state.modify_political_capital(delta),
            ResourceType::CampaignFunds => self.state.modify_campaign_funds(delta),
            ResourceType::MediaInfluence => self.state.modify_media_influence(delta),
            ResourceType::PartyLoyalty => self.state.modify_party_loyalty(delta),
            ResourceType::StaffMorale => self.state.modify_staff_morale(delta),
            ResourceType::VoterBlocSupport => {
                let bloc = bloc.ok_or(ApplyError::MissingTargetBloc)?;
                self.state.modify_voter_bloc_support(bloc, delta)?;
            }
            ResourceType::AlignmentLawChaos => self.state.shift_alignment(delta, 0.0),
            ResourceType::AlignmentGoodEvil => self.state.shift_alignment(0.0, delta),
        }
        Ok(())
    }

    fn record(&mut self, outcomes: &[TurnOutcome]) {
        let turn = self.turn;
        self.ledger.extend(outcomes.iter().cloned().map(|outcome| LedgerEntry { turn, outcome }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{TestGameState, assert_approx};

    fn applicator_with_blocs(blocs: &[&str]) -> EffectApplicator<TestGameState> {
        EffectApplicator::new(
            TestGameState::with_blocs(blocs),
            ConsequenceConfig::default(),
            TemporalConfig::default(),
        )
    }

    fn ready_effect(resource: ResourceType, magnitude: f64) -> ConsequenceEffect {
        let mut effect = ConsequenceEffect::new(resource, EffectType::Immediate, magnitude);
        effect.actual_applied = magnitude;
        effect
    }

    #[test]
    fn apply_effect_is_idempotent() {
        let mut applicator = applicator_with_blocs(&[]);
        let mut effect = ready_effect(ResourceType::PublicTrust, 0.2);

        assert!(applicator.apply_effect(&mut effect).unwrap());
        assert_approx(applicator.state().trust, 0.7, 1e-12, "after first apply");

        // Second apply is guarded by is_applied.
        assert!(!applicator.apply_effect(&mut effect).unwrap());
        assert_approx(applicator.state().trust, 0.7, 1e-12, "after second apply");
    }

    #[test]
    fn sub_threshold_effect_is_noop() {
        let mut applicator = applicator_with_blocs(&[]);
        let mut effect = ready_effect(ResourceType::PublicTrust, 0.005);
        assert!(!applicator.apply_effect(&mut effect).unwrap());
        assert!(!effect.is_applied);
        assert_approx(applicator.state().trust, 0.5, 1e-12, "trust untouched");
    }

    #[test]
    fn missing_target_bloc_is_an_error() {
        let mut applicator = applicator_with_blocs(&["urban"]);
        let mut effect = ready_effect(ResourceType::VoterBlocSupport, 0.1);
        assert_eq!(
            applicator.apply_effect(&mut effect),
            Err(ApplyError::MissingTargetBloc)
        );
    }

    #[test]
    fn unknown_bloc_surfaces_from_state() {
        let mut applicator = applicator_with_blocs(&["urban"]);
        let mut effect = ready_effect(ResourceType::VoterBlocSupport, 0.1)
            .with_target_bloc("offworld");
        effect.actual_applied = 0.1;
        assert_eq!(
            applicator.apply_effect(&mut effect),
            Err(ApplyError::UnknownVoterBloc("offworld".to_string()))
        );
    }

    #[test]
    fn turn_outcomes_ordered_delayed_then_slices_then_decay() {
        let mut applicator = applicator_with_blocs(&["urban"]);

        let mut delayed = ready_effect(ResourceType::PoliticalCapital, 0.1);
        delayed.effect_type = EffectType::Delayed;
        delayed.delay_turns = 1;
        applicator.queued.push_back(delayed);

        let mut gradual = ConsequenceEffect::new(
            ResourceType::StaffMorale,
            EffectType::Gradual,
            0.3,
        )
        .with_duration(3);
        gradual.actual_applied = 0.3;
        gradual.turns_remaining = 3;
        applicator.active.push(gradual);

        let outcomes = applicator.process_turn().unwrap();

        // Delayed application first, then the gradual slice, then decay.
        assert!(matches!(
            &outcomes[0],
            TurnOutcome::Applied { effect } if effect.resource == ResourceType::PoliticalCapital
        ));
        assert!(matches!(
            &outcomes[1],
            TurnOutcome::Applied { effect } if effect.resource == ResourceType::StaffMorale
        ));
        assert!(matches!(
            &outcomes[2],
            TurnOutcome::Decayed { resource: ResourceType::PublicTrust, .. }
        ));
        assert!(matches!(
            &outcomes[3],
            TurnOutcome::Decayed { resource: ResourceType::MediaInfluence, .. }
        ));
        assert!(matches!(
            &outcomes[4],
            TurnOutcome::Decayed { resource: ResourceType::VoterBlocSupport, bloc: Some(b), .. } if b == "urban"
        ));
        assert_eq!(outcomes.len(), 5);
    }

    #[test]
    fn decay_runs_every_turn() {
        let mut applicator = applicator_with_blocs(&["urban", "rural"]);
        applicator.process_turn().unwrap();
        applicator.process_turn().unwrap();

        let state = applicator.state();
        assert_approx(state.trust, 0.5 - 2.0 * 0.02, 1e-12, "trust decay");
        assert_approx(state.media_influence, 0.5 - 2.0 * 0.1, 1e-12, "media decay");
        assert_approx(
            state.voter_blocs["urban"],
            0.5 - 2.0 * 0.03,
            1e-12,
            "bloc decay",
        );
        assert_approx(
            state.voter_blocs["rural"],
            0.5 - 2.0 * 0.03,
            1e-12,
            "bloc decay",
        );
    }

    #[test]
    fn ledger_records_turn_numbers() {
        let mut applicator = applicator_with_blocs(&[]);
        applicator.process_turn().unwrap();
        applicator.process_turn().unwrap();
        let turns: Vec<u32> = applicator.ledger().iter().map(|e| e.turn).collect();
        assert_eq!(turns, vec![1, 1, 2, 2]);
    }
}
