//! Deterministic animal/adopter compatibility scoring.
//!
//! Five independent rules each produce a 0-100 facet score. The total is the weighted sum of the
//! facets truncated toward zero, so fractional points are always dropped (never rounded up).

mod config;
mod rules;
mod tier;

pub use config::{
    BehaviorPolicy, CategoryTables, ScoringConfig, ScoringConfigError, ScoringWeights,
    WEIGHT_SUM_TOLERANCE,
};
pub use rules::{estimate_size, AnimalSize};
pub use tier::RecommendationTier;

use super::records::{AdopterRecord, AnimalRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The five compatibility facets, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    LifestyleMatch,
    ExperienceMatch,
    HomeFit,
    BehavioralFit,
    SpecialNeeds,
}

impl ScoreFactor {
    pub const ALL: [ScoreFactor; 5] = [
        ScoreFactor::LifestyleMatch,
        ScoreFactor::ExperienceMatch,
        ScoreFactor::HomeFit,
        ScoreFactor::BehavioralFit,
        ScoreFactor::SpecialNeeds,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ScoreFactor::LifestyleMatch => "lifestyle_match",
            ScoreFactor::ExperienceMatch => "experience_match",
            ScoreFactor::HomeFit => "home_fit",
            ScoreFactor::BehavioralFit => "behavioral_fit",
            ScoreFactor::SpecialNeeds => "special_needs",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::LifestyleMatch => "Lifestyle Compatibility",
            ScoreFactor::ExperienceMatch => "Experience Match",
            ScoreFactor::HomeFit => "Home Fit",
            ScoreFactor::BehavioralFit => "Behavioral Compatibility",
            ScoreFactor::SpecialNeeds => "Special Needs Capability",
        }
    }
}

/// Per-facet scores and the weighted total for one animal/adopter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lifestyle_match: u8,
    pub experience_match: u8,
    pub home_fit: u8,
    pub behavioral_fit: u8,
    pub special_needs: u8,
    pub total: u8,
}

impl ScoreBreakdown {
    pub const fn factor(&self, factor: ScoreFactor) -> u8 {
        match factor {
            ScoreFactor::LifestyleMatch => self.lifestyle_match,
            ScoreFactor::ExperienceMatch => self.experience_match,
            ScoreFactor::HomeFit => self.home_fit,
            ScoreFactor::BehavioralFit => self.behavioral_fit,
            ScoreFactor::SpecialNeeds => self.special_needs,
        }
    }

    pub fn components(&self) -> Vec<(ScoreFactor, u8)> {
        ScoreFactor::ALL
            .iter()
            .map(|factor| (*factor, self.factor(*factor)))
            .collect()
    }

    pub fn tier(&self) -> RecommendationTier {
        RecommendationTier::for_score(self.total)
    }

    /// Header naming both parties followed by one line per facet.
    pub fn reasoning(&self, animal_name: &str, adopter_name: &str) -> String {
        let mut reasoning = format!("Match Analysis: {animal_name} \u{2194} {adopter_name}\n");
        for (factor, score) in self.components() {
            reasoning.push_str(&format!("- {}: {}/100\n", factor.label(), score));
        }
        reasoning
    }
}

/// Score plus the explanation shown to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityAssessment {
    pub breakdown: ScoreBreakdown,
    pub reasoning: String,
}

/// Stateless scorer bound to one validated policy.
#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    config: ScoringConfig,
}

impl CompatibilityScorer {
    /// Validate the policy up front; every score computed afterwards depends on it.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn standard() -> Self {
        Self {
            config: ScoringConfig::standard(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, animal: &AnimalRecord, adopter: &AdopterRecord) -> ScoreBreakdown {
        let tables = &self.config.tables;
        let lifestyle_match = rules::lifestyle_match(animal, adopter, tables);
        let experience_match = rules::experience_match(animal, adopter);
        let home_fit = rules::home_fit(animal, adopter, tables);
        let behavioral_fit = rules::behavioral_fit(animal, adopter, &self.config.behavior);
        let special_needs = rules::special_needs_capability(animal, adopter);

        let mut breakdown = ScoreBreakdown {
            lifestyle_match,
            experience_match,
            home_fit,
            behavioral_fit,
            special_needs,
            total: 0,
        };
        breakdown.total = self.weighted_total(&breakdown);

        debug!(
            animal_id = %animal.animal_id,
            adopter_id = %adopter.adopter_id,
            total = breakdown.total,
            "scored pair"
        );

        breakdown
    }

    pub fn assess(&self, animal: &AnimalRecord, adopter: &AdopterRecord) -> CompatibilityAssessment {
        let breakdown = self.score(animal, adopter);
        let reasoning = breakdown.reasoning(&animal.name, &adopter.name);
        CompatibilityAssessment {
            breakdown,
            reasoning,
        }
    }

    fn weighted_total(&self, breakdown: &ScoreBreakdown) -> u8 {
        let weighted: f64 = ScoreFactor::ALL
            .iter()
            .map(|factor| f64::from(breakdown.factor(*factor)) * self.config.weights.weight(*factor))
            .sum();

        // Truncates toward zero; the clamp absorbs weight-sum drift inside the tolerance.
        weighted.clamp(0.0, 100.0) as u8
    }
}

impl Default for CompatibilityScorer {
    fn default() -> Self {
        Self::standard()
    }
}
