use std::collections::BTreeMap;

use crate::model::{ReputationTag, ResourceType};

use super::stance::StanceHistoryTracker;
use super::state::GameStateProvider;

/// Read-only snapshot passed into a consequence calculation.
///
/// Bundles everything the pipeline reads so the calculator itself stays
/// a pure function; the borrowed pieces live in long-lived game state.
pub struct ConsequenceContext<'a> {
    pub office_tier: u8,
    pub approval: f64,
    pub current_turn: u32,
    pub turns_until_election: u32,
    pub chaos_mode: bool,
    pub staff_quality: f64,
    pub player_name: String,
    pub party_name: String,
    /// `(law_chaos, good_evil)` axes.
    pub alignment: (f64, f64),
    /// Current resource standing, for callers that want it in the snapshot.
    pub resources: BTreeMap<ResourceType, f64>,
    /// Current per-bloc support.
    pub voter_blocs: BTreeMap<String, f64>,
    pub reputation_tags: &'a [ReputationTag],
    pub stance_history: &'a StanceHistoryTracker,
    /// Optional real-world polling signal; `None` disables blending.
    pub poll_signal: Option<f64>,
}

impl<'a> ConsequenceContext<'a> {
    /// Build a snapshot from the read boundary. Resource standings start
    /// empty; fill them with the builder methods if the caller tracks
    /// them.
    pub fn snapshot(
        provider: &dyn GameStateProvider,
        reputation_tags: &'a [ReputationTag],
        stance_history: &'a StanceHistoryTracker,
    ) -> Self {
        Self {
            office_tier: provider.office_tier(),
            approval: provider.approval(),
            current_turn: provider.current_turn(),
            turns_until_election: provider.turns_until_election(),
            chaos_mode: provider.chaos_mode_enabled(),
            staff_quality: provider.staff_quality(),
            player_name: provider.player_name().to_string(),
            party_name: provider.party_name().to_string(),
            alignment: provider.alignment(),
            resources: BTreeMap::new(),
            voter_blocs: BTreeMap::new(),
            reputation_tags,
            stance_history,
            poll_signal: None,
        }
    }

    pub fn with_poll_signal(mut self, signal: f64) -> Self {
        self.poll_signal = Some(signal);
        self
    }

    pub fn with_resources(mut self, resources: BTreeMap<ResourceType, f64>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_voter_blocs(mut self, voter_blocs: BTreeMap<String, f64>) -> Self {
        self.voter_blocs = voter_blocs;
        self
    }
}
