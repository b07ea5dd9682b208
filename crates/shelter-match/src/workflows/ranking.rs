//! Ranks every listed animal against one adopter.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::records::{AdopterId, AdopterRecord, AnimalId, AnimalRecord, RecordStore};
use super::scoring::{
    estimate_size, AnimalSize, CompatibilityScorer, RecommendationTier, ScoreBreakdown,
};

/// Default ranking cut-off when the caller does not ask for a specific count.
pub const DEFAULT_TOP_N: usize = 3;

/// One scored animal in an adopter's ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatch {
    pub animal_id: AnimalId,
    pub animal_name: String,
    pub adopter_id: AdopterId,
    pub adopter_name: String,
    pub score: u8,
    pub reasoning: String,
}

/// Full analysis of a single animal/adopter pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedMatch {
    pub animal_id: AnimalId,
    pub animal_name: String,
    pub adopter_id: AdopterId,
    pub adopter_name: String,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub reasoning: String,
    pub tier: RecommendationTier,
    pub recommendation: &'static str,
    pub estimated_size: AnimalSize,
    pub animal: AnimalRecord,
    pub adopter: AdopterRecord,
}

/// Scores an adopter against the whole animal list with a shared scorer.
#[derive(Debug, Clone)]
pub struct MatchRanker {
    scorer: Arc<CompatibilityScorer>,
}

impl MatchRanker {
    pub fn new(scorer: Arc<CompatibilityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    /// Best `top_n` animals for the adopter, highest score first.
    ///
    /// Equal scores keep store order. An unknown adopter yields an empty ranking.
    pub fn find_matches(
        &self,
        records: &RecordStore,
        adopter_id: &AdopterId,
        top_n: usize,
    ) -> Vec<RankedMatch> {
        let Some(adopter) = records.adopter(adopter_id) else {
            warn!(%adopter_id, "adopter not found, no matches ranked");
            return Vec::new();
        };

        let mut matches: Vec<RankedMatch> = records
            .animals()
            .iter()
            .map(|animal| {
                let assessment = self.scorer.assess(animal, adopter);
                RankedMatch {
                    animal_id: animal.animal_id.clone(),
                    animal_name: animal.name.clone(),
                    adopter_id: adopter.adopter_id.clone(),
                    adopter_name: adopter.name.clone(),
                    score: assessment.breakdown.total,
                    reasoning: assessment.reasoning,
                }
            })
            .collect();

        // `sort_by` is stable, which keeps ties in store order.
        matches.sort_by(|left, right| right.score.cmp(&left.score));
        matches.truncate(top_n);

        info!(%adopter_id, returned = matches.len(), "ranked matches");
        matches
    }

    pub fn detailed_match(
        &self,
        records: &RecordStore,
        animal_id: &AnimalId,
        adopter_id: &AdopterId,
    ) -> Option<DetailedMatch> {
        let animal = records.animal(animal_id);
        let adopter = records.adopter(adopter_id);
        let (Some(animal), Some(adopter)) = (animal, adopter) else {
            warn!(%animal_id, %adopter_id, "animal or adopter not found");
            return None;
        };

        let assessment = self.scorer.assess(animal, adopter);
        let tier = assessment.breakdown.tier();

        Some(DetailedMatch {
            animal_id: animal.animal_id.clone(),
            animal_name: animal.name.clone(),
            adopter_id: adopter.adopter_id.clone(),
            adopter_name: adopter.name.clone(),
            score: assessment.breakdown.total,
            breakdown: assessment.breakdown,
            reasoning: assessment.reasoning,
            tier,
            recommendation: tier.guidance(),
            estimated_size: estimate_size(&animal.breed, &self.scorer.config().tables),
            animal: animal.clone(),
            adopter: adopter.clone(),
        })
    }
}

impl Default for MatchRanker {
    fn default() -> Self {
        Self::new(Arc::new(CompatibilityScorer::standard()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ANIMALS: &str = "animal_id,name,species,breed,age_years,energy_level,good_with_kids,good_with_dogs,special_needs,behavioral_traits\n\
1,Max,Dog,Golden Retriever,3,high,yes,yes,no,friendly\n\
2,Whiskers,Cat,Tabby,5,low,no,no,yes,independent\n\
3,Biscuit,Dog,Beagle,2,high,yes,yes,no,curious\n\
4,Rocky,Dog,Labrador,4,high,yes,yes,no,loyal\n";

    const ADOPTERS: &str = "adopter_id,name,home_type,has_kids,has_other_pets,lifestyle,commitment_level,experience_level,preferences\n\
1,John Smith,house,yes,yes,active,medium,beginner,dogs\n";

    fn records() -> RecordStore {
        RecordStore::from_readers(Cursor::new(ANIMALS), Cursor::new(ADOPTERS))
            .expect("records load")
    }

    #[test]
    fn ranking_is_sorted_descending_and_truncated() {
        let ranker = MatchRanker::default();
        let matches = ranker.find_matches(&records(), &AdopterId::from("1"), 3);

        assert_eq!(matches.len(), 3);
        assert!(matches
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(matches[0].adopter_name, "John Smith");
    }

    #[test]
    fn equal_scores_keep_store_order() {
        let ranker = MatchRanker::default();
        let matches = ranker.find_matches(&records(), &AdopterId::from("1"), 10);

        // Max and Rocky are both large high-energy dogs and tie on every facet.
        let ids: Vec<&str> = matches.iter().map(|m| m.animal_id.0.as_str()).collect();
        assert_eq!(matches[0].score, matches[1].score);
        assert_eq!(&ids[..2], &["1", "4"]);
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn unknown_adopter_gets_no_matches() {
        let ranker = MatchRanker::default();
        assert!(ranker
            .find_matches(&records(), &AdopterId::from("404"), 3)
            .is_empty());
    }

    #[test]
    fn top_n_larger_than_listing_returns_everything() {
        let ranker = MatchRanker::default();
        let matches = ranker.find_matches(&records(), &AdopterId::from("1"), 25);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn detailed_match_includes_tier_and_size() {
        let ranker = MatchRanker::default();
        let detail = ranker
            .detailed_match(&records(), &AnimalId::from("1"), &AdopterId::from("1"))
            .expect("both records exist");

        assert_eq!(detail.score, 98);
        assert_eq!(detail.tier, RecommendationTier::StrongMatch);
        assert_eq!(detail.recommendation, "STRONG MATCH - Highly recommended");
        assert_eq!(detail.estimated_size, AnimalSize::Large);
        assert_eq!(detail.animal.name, "Max");
    }

    #[test]
    fn detailed_match_requires_both_records() {
        let ranker = MatchRanker::default();
        assert!(ranker
            .detailed_match(&records(), &AnimalId::from("9"), &AdopterId::from("1"))
            .is_none());
        assert!(ranker
            .detailed_match(&records(), &AnimalId::from("1"), &AdopterId::from("9"))
            .is_none());
    }
}
