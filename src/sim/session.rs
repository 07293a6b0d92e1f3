use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{ConsequenceConfig, TemporalConfig};
use crate::model::{NewsGameEvent, ResponseOption, ResponseResult, StanceRecord};

use super::applicator::{EffectApplicator, LedgerEntry, TurnOutcome};
use super::calculator::ConsequenceCalculator;
use super::context::ConsequenceContext;
use super::stance::StanceHistoryTracker;
use super::state::{ApplyError, GameStateModifier, GameStateProvider};

/// Ties calculator, applicator, and stance tracker into the full
/// "event → response → turns" loop over one game state.
///
/// Owns the seeded rng, so the same seed and the same sequence of calls
/// replays identically. Lifetime is the surrounding game session's;
/// nothing here is process-wide.
pub struct GameSession<S: GameStateProvider + GameStateModifier> {
    calculator: ConsequenceCalculator,
    applicator: EffectApplicator<S>,
    stances: StanceHistoryTracker,
    rng: SmallRng,
    poll_signal: Option<f64>,
}

impl<S: GameStateProvider + GameStateModifier> GameSession<S> {
    pub fn new(state: S, config: ConsequenceConfig, temporal: TemporalConfig, seed: u64) -> Self {
        Self {
            calculator: ConsequenceCalculator::new(config.clone(), temporal.clone()),
            applicator: EffectApplicator::new(state, config, temporal.clone()),
            stances: StanceHistoryTracker::new(temporal.stance_history_cap),
            rng: SmallRng::seed_from_u64(seed),
            poll_signal: None,
        }
    }

    /// Feed the next calculation an external polling signal; sticky until
    /// cleared.
    pub fn set_poll_signal(&mut self, signal: Option<f64>) {
        self.poll_signal = signal;
    }

    /// Resolve the player's chosen response to an event: calculate the
    /// consequences, log the public stance it implies, and hand the
    /// result to the applicator. Returns the result for presentation.
    pub fn respond(
        &mut self,
        event: &NewsGameEvent,
        response: &ResponseOption,
    ) -> Result<ResponseResult, ApplyError> {
        let turn = self.applicator.state().current_turn();
        let tags = self.applicator.state().active_reputation_tags().to_vec();
        let result = {
            let mut ctx = ConsequenceContext::snapshot(self.applicator.state(), &tags, &self.stances);
            ctx.poll_signal = self.poll_signal;
            self.calculator.calculate(event, response, &ctx, &mut self.rng)
        };

        self.stances.record_stance(StanceRecord::new(
            event.category.clone(),
            response.label.clone(),
            implied_stance_strength(response),
            turn,
            event.event_id.clone(),
            true,
        ));

        self.applicator.apply_response_result(result.clone())?;
        Ok(result)
    }

    /// Advance one turn boundary.
    pub fn advance_turn(&mut self) -> Result<Vec<TurnOutcome>, ApplyError> {
        self.applicator.process_turn()
    }

    pub fn state(&self) -> &S {
        self.applicator.state()
    }

    pub fn state_mut(&mut self) -> &mut S {
        self.applicator.state_mut()
    }

    pub fn stances(&self) -> &StanceHistoryTracker {
        &self.stances
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        self.applicator.ledger()
    }

    pub fn applicator(&self) -> &EffectApplicator<S> {
        &self.applicator
    }
}

/// Net public direction a response implies, from the signs of its
/// template effects.
fn implied_stance_strength(response: &ResponseOption) -> f64 {
    let total: f64 = response
        .resource_effects
        .values()
        .chain(response.voter_bloc_effects.values())
        .sum();
    total.clamp(-1.0, 1.0)
}
