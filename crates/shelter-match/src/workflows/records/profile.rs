use super::domain::{AdopterId, AdopterRecord, AnimalId, AnimalRecord};
use serde::Serialize;

/// Structured view of an animal used by intake staff and the inquiry workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalProfile {
    pub id: AnimalId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: u32,
    pub energy_level: Option<String>,
    pub good_with_kids: bool,
    pub good_with_dogs: bool,
    pub special_needs: bool,
    pub behavioral_traits: Vec<String>,
    pub summary: String,
}

impl AnimalProfile {
    pub fn from_record(record: &AnimalRecord) -> Self {
        let energy = record.energy_level.as_deref().unwrap_or("unknown");
        let summary = format!(
            "{}, a {}-year-old {} with {} energy. Traits: {}. Good with kids: {}, Good with dogs: {}",
            record.name,
            record.age_years,
            record.breed,
            energy,
            record.behavioral_traits.join(", "),
            record.good_with_kids,
            record.good_with_dogs,
        );

        Self {
            id: record.animal_id.clone(),
            name: record.name.clone(),
            species: record.species.clone(),
            breed: record.breed.clone(),
            age_years: record.age_years,
            energy_level: record.energy_level.clone(),
            good_with_kids: record.good_with_kids,
            good_with_dogs: record.good_with_dogs,
            special_needs: record.special_needs,
            behavioral_traits: record.behavioral_traits.clone(),
            summary,
        }
    }
}

/// Structured view of an adopter's household and commitments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdopterProfile {
    pub id: AdopterId,
    pub name: String,
    pub home_type: Option<String>,
    pub has_kids: bool,
    pub has_other_pets: bool,
    pub lifestyle: Option<String>,
    pub commitment_level: Option<String>,
    pub experience_level: Option<String>,
    pub preferences: Vec<String>,
    pub summary: String,
}

impl AdopterProfile {
    pub fn from_record(record: &AdopterRecord) -> Self {
        let summary = format!(
            "{}, living in a {} with {} lifestyle. Experience: {}, Commitment: {}",
            record.name,
            record.home_type.as_deref().unwrap_or("unspecified home"),
            record.lifestyle.as_deref().unwrap_or("unspecified"),
            record.experience_level.as_deref().unwrap_or("unspecified"),
            record.commitment_level.as_deref().unwrap_or("unspecified"),
        );

        Self {
            id: record.adopter_id.clone(),
            name: record.name.clone(),
            home_type: record.home_type.clone(),
            has_kids: record.has_kids,
            has_other_pets: record.has_other_pets,
            lifestyle: record.lifestyle.clone(),
            commitment_level: record.commitment_level.clone(),
            experience_level: record.experience_level.clone(),
            preferences: record.preferences.clone(),
            summary,
        }
    }
}
