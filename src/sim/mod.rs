mod applicator;
mod calculator;
mod context;
mod narrative;
mod session;
mod stance;
mod state;

pub use applicator::{EffectApplicator, LedgerEntry, TurnOutcome};
pub use calculator::ConsequenceCalculator;
pub use context::ConsequenceContext;
pub use session::GameSession;
pub use stance::{StanceHistoryTracker, consistency_multiplier};
pub use state::{ApplyError, GameStateModifier, GameStateProvider};
