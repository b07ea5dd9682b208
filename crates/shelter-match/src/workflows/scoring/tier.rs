use serde::{Deserialize, Serialize};

/// Staff-facing bucket for a total compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    NotRecommended,
    PossibleMatch,
    GoodMatch,
    StrongMatch,
}

impl RecommendationTier {
    pub const fn for_score(score: u8) -> Self {
        match score {
            80.. => RecommendationTier::StrongMatch,
            60..=79 => RecommendationTier::GoodMatch,
            40..=59 => RecommendationTier::PossibleMatch,
            _ => RecommendationTier::NotRecommended,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RecommendationTier::StrongMatch => "strong match",
            RecommendationTier::GoodMatch => "good match",
            RecommendationTier::PossibleMatch => "possible match",
            RecommendationTier::NotRecommended => "not recommended",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            RecommendationTier::StrongMatch => "STRONG MATCH - Highly recommended",
            RecommendationTier::GoodMatch => "GOOD MATCH - Recommended with notes",
            RecommendationTier::PossibleMatch => {
                "POSSIBLE MATCH - Requires careful consideration"
            }
            RecommendationTier::NotRecommended => "NOT RECOMMENDED - Compatibility concerns",
        }
    }
}
