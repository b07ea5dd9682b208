use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ScoreFactor;

/// Allowed drift when checking that the weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Scoring policy: factor weights plus the categorical tables consulted by the rules.
///
/// A policy is immutable once handed to a [`super::CompatibilityScorer`]; build a second scorer
/// to compare policies side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub tables: CategoryTables,
    #[serde(default)]
    pub behavior: BehaviorPolicy,
}

impl ScoringConfig {
    /// The shelter's production policy.
    pub fn standard() -> Self {
        Self {
            weights: ScoringWeights::standard(),
            tables: CategoryTables::standard(),
            behavior: BehaviorPolicy::standard(),
        }
    }

    /// Read a JSON policy file. The result still has to pass [`ScoringConfig::validate`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScoringConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ScoringConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        self.weights.validate()?;
        if self.behavior.floor > 100 {
            return Err(ScoringConfigError::BehaviorFloor {
                floor: self.behavior.floor,
            });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fraction of the total score contributed by each factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub lifestyle_match: f64,
    pub experience_match: f64,
    pub home_fit: f64,
    pub behavioral_fit: f64,
    pub special_needs: f64,
}

impl ScoringWeights {
    pub const fn standard() -> Self {
        Self {
            lifestyle_match: 0.30,
            experience_match: 0.20,
            home_fit: 0.20,
            behavioral_fit: 0.20,
            special_needs: 0.10,
        }
    }

    pub fn weight(&self, factor: ScoreFactor) -> f64 {
        match factor {
            ScoreFactor::LifestyleMatch => self.lifestyle_match,
            ScoreFactor::ExperienceMatch => self.experience_match,
            ScoreFactor::HomeFit => self.home_fit,
            ScoreFactor::BehavioralFit => self.behavioral_fit,
            ScoreFactor::SpecialNeeds => self.special_needs,
        }
    }

    pub fn sum(&self) -> f64 {
        ScoreFactor::ALL
            .iter()
            .map(|factor| self.weight(*factor))
            .sum()
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        for factor in ScoreFactor::ALL {
            let weight = self.weight(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoringConfigError::InvalidWeight {
                    factor: factor.key(),
                    weight,
                });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringConfigError::WeightSum { sum });
        }

        Ok(())
    }
}

/// Deductions applied when an animal cannot live with the household's kids or pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorPolicy {
    pub kids_penalty: u8,
    pub other_pets_penalty: u8,
    /// Lowest behavioral score; never zero so a mismatch does not read as impossible.
    pub floor: u8,
}

impl BehaviorPolicy {
    pub const fn standard() -> Self {
        Self {
            kids_penalty: 40,
            other_pets_penalty: 30,
            floor: 10,
        }
    }
}

impl Default for BehaviorPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Categorical lookup tables. Keys are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTables {
    /// Animal energy level to ordinal 1..=3.
    pub energy_levels: BTreeMap<String, u8>,
    /// Ordinal used for energy levels missing from the table.
    pub energy_fallback: u8,
    /// Adopter lifestyle to ordinal 1..=3.
    pub lifestyles: BTreeMap<String, u8>,
    /// Ordinal used for lifestyles missing from the table.
    pub lifestyle_fallback: u8,
    /// Breed substrings implying a large animal; checked before the small list.
    pub large_breed_keywords: Vec<String>,
    /// Breed substrings implying a small animal.
    pub small_breed_keywords: Vec<String>,
}

impl CategoryTables {
    pub fn standard() -> Self {
        const ENERGY: &[(&str, u8)] = &[("low", 1), ("medium", 2), ("high", 3)];
        const LIFESTYLE: &[(&str, u8)] = &[
            ("quiet", 1),
            ("relaxed", 1),
            ("busy", 1),
            ("moderate", 2),
            ("family-focused", 2),
            ("active", 3),
            ("outdoor-person", 3),
        ];
        const LARGE: &[&str] = &["retriever", "shepherd", "labrador", "pit bull"];
        const SMALL: &[&str] = &["cat", "tabby", "persian", "beagle"];

        Self {
            energy_levels: to_table(ENERGY),
            energy_fallback: 2,
            lifestyles: to_table(LIFESTYLE),
            lifestyle_fallback: 2,
            large_breed_keywords: LARGE.iter().map(|keyword| keyword.to_string()).collect(),
            small_breed_keywords: SMALL.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }

    pub fn energy_ordinal(&self, energy_level: &str) -> u8 {
        lookup(&self.energy_levels, energy_level).unwrap_or(self.energy_fallback)
    }

    pub fn lifestyle_ordinal(&self, lifestyle: &str) -> u8 {
        lookup(&self.lifestyles, lifestyle).unwrap_or(self.lifestyle_fallback)
    }
}

impl Default for CategoryTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn to_table(entries: &[(&str, u8)]) -> BTreeMap<String, u8> {
    entries
        .iter()
        .map(|(key, ordinal)| (key.to_string(), *ordinal))
        .collect()
}

fn lookup(table: &BTreeMap<String, u8>, raw: &str) -> Option<u8> {
    let key = raw.trim().to_ascii_lowercase();
    table.get(&key).copied().or_else(|| {
        table
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(&key))
            .map(|(_, ordinal)| *ordinal)
    })
}

/// Scoring policy rejected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
    #[error("weight for {factor} must be a non-negative number, got {weight}")]
    InvalidWeight { factor: &'static str, weight: f64 },
    #[error("behavioral floor must be at most 100, got {floor}")]
    BehaviorFloor { floor: u8 },
    #[error("failed to read scoring config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scoring config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weights_sum_to_one() {
        let weights = ScoringWeights::standard();
        assert!((weights.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!(ScoringConfig::standard().validate().is_ok());
    }

    #[test]
    fn weights_that_do_not_sum_to_one_are_rejected() {
        let mut config = ScoringConfig::standard();
        config.weights.lifestyle_match = 0.35;

        match config.validate() {
            Err(ScoringConfigError::WeightSum { sum }) => assert!((sum - 1.05).abs() < 1e-9),
            other => panic!("expected weight sum violation, got {other:?}"),
        }
    }

    #[test]
    fn negative_weights_are_rejected_even_when_sum_is_one() {
        let mut config = ScoringConfig::standard();
        config.weights.lifestyle_match = 0.50;
        config.weights.special_needs = -0.10;

        match config.validate() {
            Err(ScoringConfigError::InvalidWeight { factor, .. }) => {
                assert_eq!(factor, "special_needs")
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn table_lookups_are_case_insensitive_with_fallbacks() {
        let tables = CategoryTables::standard();
        assert_eq!(tables.energy_ordinal("HIGH"), 3);
        assert_eq!(tables.energy_ordinal(" low "), 1);
        assert_eq!(tables.energy_ordinal("hyper"), 2);
        assert_eq!(tables.lifestyle_ordinal("Outdoor-Person"), 3);
        assert_eq!(tables.lifestyle_ordinal("busy"), 1);
        assert_eq!(tables.lifestyle_ordinal("nomadic"), 2);
    }

    #[test]
    fn custom_table_keys_match_regardless_of_case() {
        let mut tables = CategoryTables::standard();
        tables.lifestyles.insert("Remote-Worker".to_string(), 1);
        assert_eq!(tables.lifestyle_ordinal("remote-worker"), 1);
    }

    #[test]
    fn policy_round_trips_through_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scoring.json");
        let mut config = ScoringConfig::standard();
        config.weights.lifestyle_match = 0.25;
        config.weights.special_needs = 0.15;
        std::fs::write(&path, serde_json::to_string(&config).expect("serialize"))
            .expect("write policy");

        let loaded = ScoringConfig::from_path(&path).expect("policy loads");
        assert_eq!(loaded, config);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn unreadable_policy_file_reports_path() {
        let error = ScoringConfig::from_path("./missing-scoring.json").expect_err("missing file");
        assert!(matches!(error, ScoringConfigError::Read { .. }));
        assert!(error.to_string().contains("missing-scoring.json"));
    }
}
