use serde::Serialize;

use super::factors::FactorKey;

/// Allowed drift between the weight total and 100 before the table is considered broken.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Soft factors that tend to co-vary; see [`super::composite`] for how they are dampened.
pub const CLUSTER_FACTORS: [FactorKey; 4] = [
    FactorKey::EcsLeadership,
    FactorKey::AwardsPublications,
    FactorKey::PortfolioAudition,
    FactorKey::Essay,
];

const STANDARD_WEIGHTS: [(FactorKey, f64); 20] = [
    (FactorKey::Grades, 16.0),
    (FactorKey::Rigor, 12.0),
    (FactorKey::Testing, 8.0),
    (FactorKey::Essay, 8.0),
    (FactorKey::EcsLeadership, 10.0),
    (FactorKey::Recommendations, 6.0),
    (FactorKey::PlanTiming, 3.0),
    (FactorKey::AthleticRecruit, 4.0),
    (FactorKey::MajorFit, 4.0),
    (FactorKey::GeographyResidency, 3.0),
    (FactorKey::FirstgenDiversity, 4.0),
    (FactorKey::AbilityToPay, 2.0),
    (FactorKey::AwardsPublications, 5.0),
    (FactorKey::PortfolioAudition, 3.0),
    (FactorKey::PolicyKnob, 2.0),
    (FactorKey::DemonstratedInterest, 2.0),
    (FactorKey::Legacy, 2.0),
    (FactorKey::Interview, 2.0),
    (FactorKey::ConductRecord, 2.0),
    (FactorKey::HsReputation, 2.0),
];

/// Immutable factor weights, expressed as percentages of the full applicant picture.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: [f64; FactorKey::ALL.len()],
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl WeightTable {
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_WEIGHTS)
    }

    /// Build a table from explicit entries. Factors without an entry weigh nothing.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (FactorKey, f64)>,
    {
        let mut weights = [0.0; FactorKey::ALL.len()];
        for (factor, weight) in entries {
            if let Some(slot) = weights.get_mut(factor as usize) {
                *slot = weight;
            }
        }
        Self { weights }
    }

    pub fn weight(&self, factor: FactorKey) -> f64 {
        self.weights.get(factor as usize).copied().unwrap_or(0.0)
    }

    /// Factors paired with their weights, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FactorKey, f64)> + '_ {
        FactorKey::ALL
            .iter()
            .map(move |factor| (*factor, self.weight(*factor)))
    }

    pub fn cluster(&self) -> &'static [FactorKey] {
        &CLUSTER_FACTORS
    }

    pub fn is_cluster(&self, factor: FactorKey) -> bool {
        CLUSTER_FACTORS.contains(&factor)
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn validate(&self) -> bool {
        (self.total() - 100.0).abs() <= WEIGHT_TOLERANCE
    }

    pub fn summary(&self) -> WeightTableSummary {
        WeightTableSummary {
            weights: self
                .iter()
                .map(|(factor, weight)| WeightEntry { factor, weight })
                .collect(),
            cluster: CLUSTER_FACTORS.to_vec(),
            total: self.total(),
            valid: self.validate(),
        }
    }
}

/// Serializable view of a table for clients rendering sliders or legends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTableSummary {
    pub weights: Vec<WeightEntry>,
    pub cluster: Vec<FactorKey>,
    pub total: f64,
    pub valid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightEntry {
    pub factor: FactorKey,
    pub weight: f64,
}
