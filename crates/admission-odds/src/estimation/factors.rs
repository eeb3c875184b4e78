use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caller-supplied scores keyed by factor. A missing key means "unknown", never zero.
pub type FactorScoreMap = BTreeMap<FactorKey, f64>;

/// Fit factors considered by the estimator. Declaration order is table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    Grades,
    Rigor,
    Testing,
    Essay,
    EcsLeadership,
    Recommendations,
    PlanTiming,
    AthleticRecruit,
    MajorFit,
    GeographyResidency,
    FirstgenDiversity,
    AbilityToPay,
    AwardsPublications,
    PortfolioAudition,
    PolicyKnob,
    DemonstratedInterest,
    Legacy,
    Interview,
    ConductRecord,
    HsReputation,
}

impl FactorKey {
    pub const ALL: [FactorKey; 20] = [
        FactorKey::Grades,
        FactorKey::Rigor,
        FactorKey::Testing,
        FactorKey::Essay,
        FactorKey::EcsLeadership,
        FactorKey::Recommendations,
        FactorKey::PlanTiming,
        FactorKey::AthleticRecruit,
        FactorKey::MajorFit,
        FactorKey::GeographyResidency,
        FactorKey::FirstgenDiversity,
        FactorKey::AbilityToPay,
        FactorKey::AwardsPublications,
        FactorKey::PortfolioAudition,
        FactorKey::PolicyKnob,
        FactorKey::DemonstratedInterest,
        FactorKey::Legacy,
        FactorKey::Interview,
        FactorKey::ConductRecord,
        FactorKey::HsReputation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FactorKey::Grades => "grades",
            FactorKey::Rigor => "rigor",
            FactorKey::Testing => "testing",
            FactorKey::Essay => "essay",
            FactorKey::EcsLeadership => "ecs_leadership",
            FactorKey::Recommendations => "recommendations",
            FactorKey::PlanTiming => "plan_timing",
            FactorKey::AthleticRecruit => "athletic_recruit",
            FactorKey::MajorFit => "major_fit",
            FactorKey::GeographyResidency => "geography_residency",
            FactorKey::FirstgenDiversity => "firstgen_diversity",
            FactorKey::AbilityToPay => "ability_to_pay",
            FactorKey::AwardsPublications => "awards_publications",
            FactorKey::PortfolioAudition => "portfolio_audition",
            FactorKey::PolicyKnob => "policy_knob",
            FactorKey::DemonstratedInterest => "demonstrated_interest",
            FactorKey::Legacy => "legacy",
            FactorKey::Interview => "interview",
            FactorKey::ConductRecord => "conduct_record",
            FactorKey::HsReputation => "hs_reputation",
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFactor(pub String);

impl fmt::Display for UnknownFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown factor '{}'", self.0)
    }
}

impl std::error::Error for UnknownFactor {}

impl FromStr for FactorKey {
    type Err = UnknownFactor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        FactorKey::ALL
            .iter()
            .copied()
            .find(|factor| factor.as_str() == normalized)
            .ok_or_else(|| UnknownFactor(value.trim().to_string()))
    }
}

/// Admissions policy flags that switch individual factors off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegePolicy {
    pub uses_testing: bool,
    pub need_aware: bool,
}

impl Default for CollegePolicy {
    fn default() -> Self {
        Self {
            uses_testing: true,
            need_aware: true,
        }
    }
}

impl CollegePolicy {
    /// Whether the institution's policy excludes `factor` from scoring.
    pub fn gates(&self, factor: FactorKey) -> bool {
        match factor {
            FactorKey::Testing => !self.uses_testing,
            FactorKey::AbilityToPay => !self.need_aware,
            _ => false,
        }
    }
}
