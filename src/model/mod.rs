pub mod effect;
pub mod event;
pub mod reputation;
pub mod resource;
pub mod response;
pub mod stance;

pub use effect::{ConsequenceEffect, EffectType, Modifier};
pub use event::{EventType, NewsCycleStage, NewsGameEvent, UrgencyLevel};
pub use reputation::ReputationTag;
pub use resource::ResourceType;
pub use response::{AlignmentEffect, ResponseOption, ResponseResult};
pub use stance::StanceRecord;
