use serde::{Deserialize, Serialize};

/// The closed set of tunable resources the simulation can move.
///
/// Template data arrives as string-keyed dictionaries; [`ResourceType::parse`]
/// is the validating boundary that turns those keys into typed variants.
/// Unknown keys are rejected there (the caller logs and skips them), so every
/// effect downstream targets a known resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    PublicTrust,
    PoliticalCapital,
    CampaignFunds,
    MediaInfluence,
    PartyLoyalty,
    StaffMorale,
    VoterBlocSupport,
    AlignmentLawChaos,
    AlignmentGoodEvil,
}

impl ResourceType {
    /// Map a template string key to its variant, or `None` for unknown keys.
    ///
    /// Both the canonical snake_case name and the short form the template
    /// layer emits are accepted.
    pub fn parse(key: &str) -> Option<ResourceType> {
        match key {
            "public_trust" | "trust" => Some(ResourceType::PublicTrust),
            "political_capital" | "capital" => Some(ResourceType::PoliticalCapital),
            "campaign_funds" | "funds" => Some(ResourceType::CampaignFunds),
            "media_influence" | "media" => Some(ResourceType::MediaInfluence),
            "party_loyalty" | "loyalty" => Some(ResourceType::PartyLoyalty),
            "staff_morale" | "morale" => Some(ResourceType::StaffMorale),
            "voter_bloc_support" => Some(ResourceType::VoterBlocSupport),
            "alignment_law_chaos" | "law_chaos" => Some(ResourceType::AlignmentLawChaos),
            "alignment_good_evil" | "good_evil" => Some(ResourceType::AlignmentGoodEvil),
            _ => None,
        }
    }

    /// The canonical snake_case key for this resource (inverse of the
    /// canonical branch of [`ResourceType::parse`]). Used for diagnostics.
    pub fn key(self) -> &'static str {
        match self {
            ResourceType::PublicTrust => "public_trust",
            ResourceType::PoliticalCapital => "political_capital",
            ResourceType::CampaignFunds => "campaign_funds",
            ResourceType::MediaInfluence => "media_influence",
            ResourceType::PartyLoyalty => "party_loyalty",
            ResourceType::StaffMorale => "staff_morale",
            ResourceType::VoterBlocSupport => "voter_bloc_support",
            ResourceType::AlignmentLawChaos => "alignment_law_chaos",
            ResourceType::AlignmentGoodEvil => "alignment_good_evil",
        }
    }
}
