//! # Startup records
//!
//! The data model for the investment catalog. Records are created by the
//! external store (seed or persisted); the only field this crate ever mutates
//! is [`bookmarked`](StartupRecord::bookmarked). Nothing here creates, merges,
//! or deletes records.
//!
//! Field names on the wire follow the store's column names (`is_bookmarked`,
//! `pitch_deck_url`); sector and stage serialize to their display strings.

use serde::{Deserialize, Serialize};

/// Business sector. Closed set; the sector filter compares exact enum values.
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, strum::Display,
    strum::EnumString,
)]
pub enum Sector {
    Fintech,
    #[serde(rename = "AI")]
    #[strum(serialize = "AI")]
    Ai,
    #[serde(rename = "SaaS")]
    #[strum(serialize = "SaaS")]
    Saas,
    Climate,
    HealthTech,
    Web3,
}

impl Sector {
    /// Every sector, in presentation order.
    pub const ALL: [Sector; 6] = [
        Sector::Fintech,
        Sector::Ai,
        Sector::Saas,
        Sector::Climate,
        Sector::HealthTech,
        Sector::Web3,
    ];
}

/// Funding stage, ordered from earliest to latest round.
#[derive(
    Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display,
    strum::EnumString,
)]
pub enum FundingStage {
    #[serde(rename = "Pre-seed")]
    #[strum(serialize = "Pre-seed")]
    PreSeed,
    Seed,
    #[serde(rename = "Series A")]
    #[strum(serialize = "Series A")]
    SeriesA,
    #[serde(rename = "Series B")]
    #[strum(serialize = "Series B")]
    SeriesB,
}

/// A founding team member.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    /// Avatar image reference
    pub avatar: String,
}

/// A labeled traction metric ("MRR" / "$45k"). Free-form label/value pair.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TractionMetric {
    pub label: String,
    pub value: String,
}

/// One investment opportunity in the catalog.
///
/// `id` is opaque, unique within the dataset, and never changes after
/// creation. `raised <= target` is expected but not enforced; both are
/// display-only amounts in minor currency units.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StartupRecord {
    /// Stable, opaque record identifier
    pub id: String,
    pub name: String,
    /// One-line pitch, searched together with the name
    pub tagline: String,
    pub description: String,
    pub sector: Sector,
    pub stage: FundingStage,
    /// Amount raised so far, minor currency units
    pub raised: u64,
    /// Round target, minor currency units
    pub target: u64,
    pub valuation: u64,
    pub location: String,
    /// Logo image reference
    pub logo: String,
    /// Validation badges ("YC W24", "SOC2 Type II", ...)
    #[serde(default)]
    pub validation: Vec<String>,
    #[serde(rename = "is_bookmarked")]
    pub bookmarked: bool,
    pub pitch_deck_url: String,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub metrics: Vec<TractionMetric>,
}

impl StartupRecord {
    /// Percentage of the round target raised so far, rounded to the nearest
    /// whole percent and clamped to 100. Returns 0 for a zero target rather
    /// than dividing by it.
    pub fn percent_raised(&self) -> u32 {
        if self.target == 0 {
            return 0;
        }
        let raised = u128::from(self.raised);
        let target = u128::from(self.target);
        let percent = (raised * 100 + target / 2) / target;
        percent.min(100) as u32
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn stage_ordering_is_earliest_to_latest() {
        assert!(FundingStage::PreSeed < FundingStage::Seed);
        assert!(FundingStage::Seed < FundingStage::SeriesA);
        assert!(FundingStage::SeriesA < FundingStage::SeriesB);
    }

    #[test]
    fn sector_display_matches_store_strings() {
        assert_eq!(Sector::Ai.to_string(), "AI");
        assert_eq!(Sector::Saas.to_string(), "SaaS");
        assert_eq!(Sector::HealthTech.to_string(), "HealthTech");
        assert_eq!(Sector::from_str("AI").unwrap(), Sector::Ai);
        assert!(Sector::from_str("ai").is_err());
    }

    #[test]
    fn record_wire_names() {
        let json = serde_json::json!({
            "id": "1",
            "name": "Nebula AI",
            "tagline": "Generative infrastructure for edge computing.",
            "description": "Decentralized LLM inference at the edge.",
            "sector": "AI",
            "stage": "Pre-seed",
            "raised": 1_200_000,
            "target": 2_000_000,
            "valuation": 12_000_000,
            "location": "San Francisco, CA",
            "logo": "https://example.com/logo.svg",
            "is_bookmarked": true,
            "pitch_deck_url": "https://example.com/deck1.pdf",
        });
        let record: StartupRecord = serde_json::from_value(json).unwrap();
        assert!(record.bookmarked);
        assert_eq!(record.stage, FundingStage::PreSeed);
        assert!(record.team.is_empty());

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["is_bookmarked"], serde_json::json!(true));
        assert_eq!(out["sector"], serde_json::json!("AI"));
        assert_eq!(out["stage"], serde_json::json!("Pre-seed"));
    }

    #[test]
    fn percent_raised_rounds_and_guards_zero_target() {
        let mut record = crate::mock::sample_records().remove(0);
        record.raised = 1_200_000;
        record.target = 2_000_000;
        assert_eq!(record.percent_raised(), 60);

        record.raised = 1;
        record.target = 3;
        assert_eq!(record.percent_raised(), 33);

        record.target = 0;
        assert_eq!(record.percent_raised(), 0);
    }

    #[test]
    fn percent_raised_clamps_an_overfunded_round() {
        let mut record = crate::mock::sample_records().remove(0);
        record.raised = 1_000_000;
        record.target = 500_000;
        assert_eq!(record.percent_raised(), 100);

        // extreme ratios stay clamped instead of overflowing the percent
        record.raised = u64::MAX;
        record.target = 1;
        assert_eq!(record.percent_raised(), 100);
    }
}
