//! Shared helpers for unit and integration tests: an in-memory game
//! state implementing both boundary traits, deterministic rngs, and
//! builders for events, responses, and contexts.

use std::collections::BTreeMap;

use rand::RngCore;

use crate::model::{
    EventType, NewsGameEvent, ReputationTag, ResponseOption, UrgencyLevel,
};
use crate::sim::{
    ApplyError, ConsequenceContext, GameStateModifier, GameStateProvider, StanceHistoryTracker,
};

// ---------------------------------------------------------------------------
// In-memory game state
// ---------------------------------------------------------------------------

/// Plain-struct game state for tests and demos. Resource values
/// accumulate raw deltas (no clamping) so assertions can be exact.
#[derive(Debug, Clone)]
pub struct TestGameState {
    pub office_tier: u8,
    pub approval: f64,
    pub turn: u32,
    pub turns_until_election: u32,
    pub chaos_mode: bool,
    pub staff_quality: f64,
    pub player_name: String,
    pub party_name: String,
    pub trust: f64,
    pub political_capital: f64,
    pub campaign_funds: f64,
    pub media_influence: f64,
    pub party_loyalty: f64,
    pub staff_morale: f64,
    pub voter_blocs: BTreeMap<String, f64>,
    pub law_chaos: f64,
    pub good_evil: f64,
    pub tags: Vec<ReputationTag>,
}

impl Default for TestGameState {
    fn default() -> Self {
        Self {
            office_tier: 3,
            approval: 0.5,
            turn: 1,
            turns_until_election: 20,
            chaos_mode: false,
            staff_quality: 0.5,
            player_name: "Alex Vargas".to_string(),
            party_name: "Unity Party".to_string(),
            trust: 0.5,
            political_capital: 0.5,
            campaign_funds: 0.5,
            media_influence: 0.5,
            party_loyalty: 0.5,
            staff_morale: 0.5,
            voter_blocs: BTreeMap::new(),
            law_chaos: 0.0,
            good_evil: 0.0,
            tags: Vec::new(),
        }
    }
}

impl TestGameState {
    /// Default state plus the given voter blocs, all starting at 0.5.
    pub fn with_blocs(blocs: &[&str]) -> Self {
        let mut state = Self::default();
        for bloc in blocs {
            state.voter_blocs.insert((*bloc).to_string(), 0.5);
        }
        state
    }

    /// Age active tags by one turn, dropping the expired. Permanent tags
    /// (duration -1) never age. Game state owns expiry, so this lives
    /// here rather than in the engine.
    pub fn age_reputation_tags(&mut self) {
        for tag in &mut self.tags {
            if tag.duration_turns > 0 {
                tag.duration_turns -= 1;
            }
        }
        self.tags.retain(|tag| tag.duration_turns != 0);
    }
}

impl GameStateProvider for TestGameState {
    fn office_tier(&self) -> u8 {
        self.office_tier
    }
    fn approval(&self) -> f64 {
        self.approval
    }
    fn current_turn(&self) -> u32 {
        self.turn
    }
    fn turns_until_election(&self) -> u32 {
        self.turns_until_election
    }
    fn chaos_mode_enabled(&self) -> bool {
        self.chaos_mode
    }
    fn alignment(&self) -> (f64, f64) {
        (self.law_chaos, self.good_evil)
    }
    fn staff_quality(&self) -> f64 {
        self.staff_quality
    }
    fn active_reputation_tags(&self) -> &[ReputationTag] {
        &self.tags
    }
    fn player_name(&self) -> &str {
        &self.player_name
    }
    fn party_name(&self) -> &str {
        &self.party_name
    }
}

impl GameStateModifier for TestGameState {
    fn modify_trust(&mut self, delta: f64) {
        self.trust += delta;
    }
    fn modify_political_capital(&mut self, delta: f64) {
        self.political_capital += delta;
    }
    fn modify_campaign_funds(&mut self, delta: f64) {
        self.campaign_funds += delta;
    }
    fn modify_media_influence(&mut self, delta: f64) {
        self.media_influence += delta;
    }
    fn modify_party_loyalty(&mut self, delta: f64) {
        self.party_loyalty += delta;
    }
    fn modify_staff_morale(&mut self, delta: f64) {
        self.staff_morale += delta;
    }
    fn modify_voter_bloc_support(&mut self, bloc: &str, delta: f64) -> Result<(), ApplyError> {
        match self.voter_blocs.get_mut(bloc) {
            Some(support) => {
                *support += delta;
                Ok(())
            }
            None => Err(ApplyError::UnknownVoterBloc(bloc.to_string())),
        }
    }
    fn shift_alignment(&mut self, law_chaos_delta: f64, good_evil_delta: f64) {
        self.law_chaos += law_chaos_delta;
        self.good_evil += good_evil_delta;
    }
    fn add_reputation_tag(&mut self, tag: ReputationTag) {
        self.tags.push(tag);
    }
    fn voter_blocs(&self) -> Vec<String> {
        self.voter_blocs.keys().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Deterministic rngs
// ---------------------------------------------------------------------------

/// Rng that returns the same word forever; `forcing(roll)` pins the next
/// `f64` draw to an exact value, which is how tests force the success
/// roll to a chosen side of the threshold.
pub struct ConstRng(u64);

impl ConstRng {
    pub fn forcing(roll: f64) -> Self {
        // Inverse of the standard 53-bit f64 construction.
        Self(((roll * (1u64 << 53) as f64) as u64) << 11)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }
    fn next_u64(&mut self) -> u64 {
        self.0
    }
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.0.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

// ---------------------------------------------------------------------------
// Event / response / context builders
// ---------------------------------------------------------------------------

pub fn crisis_event() -> NewsGameEvent {
    NewsGameEvent::new(
        "ev_crisis_1",
        "Chemical spill shuts down the port",
        "environment",
        EventType::Crisis,
        UrgencyLevel::Breaking,
    )
}

pub fn scandal_event() -> NewsGameEvent {
    NewsGameEvent::new(
        "ev_scandal_1",
        "Leaked memo ties office to donor favors",
        "ethics",
        EventType::Scandal,
        UrgencyLevel::Urgent,
    )
}

pub fn policy_event() -> NewsGameEvent {
    NewsGameEvent::new(
        "ev_policy_1",
        "Transit overhaul heads to a vote",
        "infrastructure",
        EventType::Policy,
        UrgencyLevel::Developing,
    )
}

/// Fluent builder for response options in tests.
pub struct ResponseBuilder {
    inner: ResponseOption,
}

impl ResponseBuilder {
    pub fn new(option_id: &str, label: &str) -> Self {
        Self {
            inner: ResponseOption::new(option_id, label),
        }
    }

    pub fn resource(mut self, key: &str, magnitude: f64) -> Self {
        self.inner.resource_effects.insert(key.to_string(), magnitude);
        self
    }

    pub fn bloc(mut self, bloc: &str, magnitude: f64) -> Self {
        self.inner
            .voter_bloc_effects
            .insert(bloc.to_string(), magnitude);
        self
    }

    pub fn alignment(mut self, law_chaos: f64, good_evil: f64) -> Self {
        self.inner.alignment_effect.law_chaos = law_chaos;
        self.inner.alignment_effect.good_evil = good_evil;
        self
    }

    pub fn probability(mut self, probability: f64) -> Self {
        self.inner.success_probability = probability;
        self
    }

    pub fn build(self) -> ResponseOption {
        self.inner
    }
}

/// Context with every scaling factor neutral: office tier 3, mid
/// approval, election far off, chaos off, neutral staff.
pub fn baseline_context<'a>(
    tags: &'a [ReputationTag],
    stances: &'a StanceHistoryTracker,
) -> ConsequenceContext<'a> {
    ConsequenceContext {
        office_tier: 3,
        approval: 0.5,
        current_turn: 1,
        turns_until_election: 20,
        chaos_mode: false,
        staff_quality: 0.5,
        player_name: "Alex Vargas".to_string(),
        party_name: "Unity Party".to_string(),
        alignment: (0.0, 0.0),
        resources: BTreeMap::new(),
        voter_blocs: BTreeMap::new(),
        reputation_tags: tags,
        stance_history: stances,
        poll_signal: None,
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert a float is approximately equal, with a named context message.
pub fn assert_approx(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{msg}: expected ~{expected} (+-{tolerance}), got {actual}"
    );
}
