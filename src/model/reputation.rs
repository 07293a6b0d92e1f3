use serde::{Deserialize, Serialize};

use super::resource::ResourceType;

/// A named, time-boxed behavioral label attached to the player.
///
/// Tags are created by the consequence rules and owned by long-lived game
/// state, which handles their expiry. While active they scale future
/// effects whose resource matches the tag's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationTag {
    pub name: String,
    /// In `[-1, 1]`; sign decides whether the tag helps or hurts.
    pub strength: f64,
    /// Turns until expiry; `-1` means permanent.
    pub duration_turns: i32,
    /// Open category string. Categories without a configured resource
    /// mapping contribute a neutral modifier.
    pub category: String,
}

impl ReputationTag {
    pub fn new(
        name: impl Into<String>,
        strength: f64,
        duration_turns: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            strength: strength.clamp(-1.0, 1.0),
            duration_turns,
            category: category.into(),
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.duration_turns < 0
    }

    /// Resources this tag's category is configured to influence.
    fn affected_resources(&self) -> &'static [ResourceType] {
        match self.category.as_str() {
            "crisis" => &[ResourceType::PublicTrust, ResourceType::MediaInfluence],
            "scandal" => &[ResourceType::PublicTrust, ResourceType::PartyLoyalty],
            "policy" => &[ResourceType::PoliticalCapital],
            "media" => &[ResourceType::MediaInfluence],
            _ => &[],
        }
    }

    /// Scaling factor this tag contributes to an effect on `resource`,
    /// with `weight` as the per-point-of-strength lever. Non-matching
    /// resources and unconfigured categories are neutral.
    pub fn scaling_factor(&self, resource: ResourceType, weight: f64) -> f64 {
        if self.affected_resources().contains(&resource) {
            1.0 + self.strength * weight
        } else {
            1.0
        }
    }
}
