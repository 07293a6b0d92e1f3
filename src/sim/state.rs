use thiserror::Error;

use crate::model::ReputationTag;

/// Apply-time failure. These indicate a data/model mismatch between the
/// template layer and the game state, so they surface to the caller
/// instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("unknown voter bloc `{0}`")]
    UnknownVoterBloc(String),
    #[error("voter bloc effect has no target bloc")]
    MissingTargetBloc,
}

/// Read boundary into the surrounding game state, consumed when building
/// a calculation context snapshot.
pub trait GameStateProvider {
    /// Office tier from 1 (local) to 5 (national executive).
    fn office_tier(&self) -> u8;
    /// Current approval rating in `[0, 1]`.
    fn approval(&self) -> f64;
    fn current_turn(&self) -> u32;
    fn turns_until_election(&self) -> u32;
    fn chaos_mode_enabled(&self) -> bool;
    /// `(law_chaos, good_evil)` axes.
    fn alignment(&self) -> (f64, f64);
    /// Staff quality in `[0, 1]`; 0.5 is neutral.
    fn staff_quality(&self) -> f64;
    /// Tags currently attached to the player.
    fn active_reputation_tags(&self) -> &[ReputationTag];
    /// Used only for narrative text.
    fn player_name(&self) -> &str;
    fn party_name(&self) -> &str;
}

/// Write boundary into the surrounding game state, consumed by the
/// effect applicator. Implementations own clamping/bounding of their own
/// resource values.
pub trait GameStateModifier {
    fn modify_trust(&mut self, delta: f64);
    fn modify_political_capital(&mut self, delta: f64);
    fn modify_campaign_funds(&mut self, delta: f64);
    fn modify_media_influence(&mut self, delta: f64);
    fn modify_party_loyalty(&mut self, delta: f64);
    fn modify_staff_morale(&mut self, delta: f64);
    /// Fallible: the bloc must already exist in game state.
    fn modify_voter_bloc_support(&mut self, bloc: &str, delta: f64) -> Result<(), ApplyError>;
    fn shift_alignment(&mut self, law_chaos_delta: f64, good_evil_delta: f64);
    fn add_reputation_tag(&mut self, tag: ReputationTag);
    /// All tracked voter bloc ids, for baseline decay.
    fn voter_blocs(&self) -> Vec<String>;
}
