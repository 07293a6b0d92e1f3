pub mod config;
pub mod flush;
pub mod model;
pub mod sim;
pub mod testutil;

pub use config::{ConsequenceConfig, TemporalConfig};
pub use model::{
    AlignmentEffect, ConsequenceEffect, EffectType, EventType, Modifier, NewsCycleStage,
    NewsGameEvent, ReputationTag, ResourceType, ResponseOption, ResponseResult, StanceRecord,
    UrgencyLevel,
};
pub use sim::{
    ApplyError, ConsequenceCalculator, ConsequenceContext, EffectApplicator, GameSession,
    GameStateModifier, GameStateProvider, LedgerEntry, StanceHistoryTracker, TurnOutcome,
};
