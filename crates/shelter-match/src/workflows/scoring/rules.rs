use super::super::records::{AdopterRecord, AnimalRecord};
use super::config::{BehaviorPolicy, CategoryTables};
use serde::Serialize;

// Values assumed when the intake sheet has no such column. A blank cell is an unrecognised value.
const ABSENT_ENERGY_LEVEL: &str = "medium";
const ABSENT_LIFESTYLE: &str = "moderate";
const ABSENT_EXPERIENCE_LEVEL: &str = "beginner";
const ABSENT_HOME_TYPE: &str = "apartment";
const ABSENT_COMMITMENT_LEVEL: &str = "medium";

/// Size class inferred from breed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalSize {
    Small,
    Medium,
    Large,
}

impl AnimalSize {
    pub const fn label(self) -> &'static str {
        match self {
            AnimalSize::Small => "small",
            AnimalSize::Medium => "medium",
            AnimalSize::Large => "large",
        }
    }
}

fn normalized(value: Option<&str>, absent: &str) -> String {
    value.unwrap_or(absent).trim().to_ascii_lowercase()
}

pub(crate) fn lifestyle_match(
    animal: &AnimalRecord,
    adopter: &AdopterRecord,
    tables: &CategoryTables,
) -> u8 {
    let energy = tables.energy_ordinal(
        animal
            .energy_level
            .as_deref()
            .unwrap_or(ABSENT_ENERGY_LEVEL),
    );
    let lifestyle =
        tables.lifestyle_ordinal(adopter.lifestyle.as_deref().unwrap_or(ABSENT_LIFESTYLE));

    match energy.abs_diff(lifestyle) {
        0 => 100,
        1 => 70,
        _ => 40,
    }
}

pub(crate) fn experience_match(animal: &AnimalRecord, adopter: &AdopterRecord) -> u8 {
    let experience = normalized(adopter.experience_level.as_deref(), ABSENT_EXPERIENCE_LEVEL);
    let needs_handling = animal.special_needs;

    // Branch order matters: "experienced" and unrecognised levels only differ when crossed
    // with special needs.
    if needs_handling && experience == "experienced" {
        100
    } else if needs_handling && experience == "beginner" {
        40
    } else if !needs_handling && experience == "beginner" {
        90
    } else {
        100
    }
}

pub fn estimate_size(breed: &str, tables: &CategoryTables) -> AnimalSize {
    let breed = breed.to_lowercase();
    let matches_any = |keywords: &[String]| {
        keywords
            .iter()
            .any(|keyword| breed.contains(&keyword.to_lowercase()))
    };

    if matches_any(&tables.large_breed_keywords) {
        AnimalSize::Large
    } else if matches_any(&tables.small_breed_keywords) {
        AnimalSize::Small
    } else {
        AnimalSize::Medium
    }
}

pub(crate) fn home_fit(
    animal: &AnimalRecord,
    adopter: &AdopterRecord,
    tables: &CategoryTables,
) -> u8 {
    let size = estimate_size(&animal.breed, tables);
    let home_type = normalized(adopter.home_type.as_deref(), ABSENT_HOME_TYPE);

    match (home_type.as_str(), size) {
        ("house", AnimalSize::Large) => 100,
        ("house", _) => 90,
        (_, AnimalSize::Large) => 40,
        _ => 85,
    }
}

/// `good_with_dogs` stands in for compatibility with any resident pet.
pub(crate) fn behavioral_fit(
    animal: &AnimalRecord,
    adopter: &AdopterRecord,
    policy: &BehaviorPolicy,
) -> u8 {
    let mut score: u8 = 100;

    if adopter.has_kids && !animal.good_with_kids {
        score = score.saturating_sub(policy.kids_penalty);
    }

    if adopter.has_other_pets && !animal.good_with_dogs {
        score = score.saturating_sub(policy.other_pets_penalty);
    }

    score.max(policy.floor).min(100)
}

pub(crate) fn special_needs_capability(animal: &AnimalRecord, adopter: &AdopterRecord) -> u8 {
    if !animal.special_needs {
        return 100;
    }

    match normalized(adopter.commitment_level.as_deref(), ABSENT_COMMITMENT_LEVEL).as_str() {
        "high" => 95,
        "medium" => 60,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::records::{AdopterId, AnimalId};

    fn animal() -> AnimalRecord {
        AnimalRecord {
            animal_id: AnimalId::from("a"),
            name: "Pepper".to_string(),
            species: "Dog".to_string(),
            breed: "Mixed".to_string(),
            age_years: 4,
            energy_level: Some("medium".to_string()),
            good_with_kids: true,
            good_with_dogs: true,
            special_needs: false,
            behavioral_traits: Vec::new(),
        }
    }

    fn adopter() -> AdopterRecord {
        AdopterRecord {
            adopter_id: AdopterId::from("b"),
            name: "Alex".to_string(),
            home_type: Some("house".to_string()),
            has_kids: false,
            has_other_pets: false,
            lifestyle: Some("moderate".to_string()),
            commitment_level: Some("medium".to_string()),
            experience_level: Some("experienced".to_string()),
            preferences: Vec::new(),
        }
    }

    #[test]
    fn lifestyle_scores_by_ordinal_distance() {
        let tables = CategoryTables::standard();
        let mut pet = animal();
        let mut person = adopter();

        assert_eq!(lifestyle_match(&pet, &person, &tables), 100);

        pet.energy_level = Some("high".to_string());
        assert_eq!(lifestyle_match(&pet, &person, &tables), 70);

        person.lifestyle = Some("quiet".to_string());
        assert_eq!(lifestyle_match(&pet, &person, &tables), 40);
    }

    #[test]
    fn lifestyle_defaults_absent_and_unknown_values_to_medium() {
        let tables = CategoryTables::standard();
        let mut pet = animal();
        let mut person = adopter();
        pet.energy_level = None;
        person.lifestyle = Some("globetrotter".to_string());

        assert_eq!(lifestyle_match(&pet, &person, &tables), 100);
    }

    #[test]
    fn experience_follows_decision_table() {
        let mut pet = animal();
        let mut person = adopter();

        pet.special_needs = true;
        assert_eq!(experience_match(&pet, &person), 100);
        person.experience_level = Some("Beginner".to_string());
        assert_eq!(experience_match(&pet, &person), 40);
        person.experience_level = Some("other".to_string());
        assert_eq!(experience_match(&pet, &person), 100);

        pet.special_needs = false;
        person.experience_level = Some("beginner".to_string());
        assert_eq!(experience_match(&pet, &person), 90);
        person.experience_level = Some("experienced".to_string());
        assert_eq!(experience_match(&pet, &person), 100);
    }

    #[test]
    fn absent_experience_is_treated_as_beginner() {
        let mut pet = animal();
        let mut person = adopter();
        pet.special_needs = true;
        person.experience_level = None;

        assert_eq!(experience_match(&pet, &person), 40);
    }

    #[test]
    fn size_prefers_large_keywords() {
        let tables = CategoryTables::standard();
        assert_eq!(estimate_size("Golden Retriever", &tables), AnimalSize::Large);
        assert_eq!(estimate_size("PIT BULL mix", &tables), AnimalSize::Large);
        assert_eq!(estimate_size("Persian", &tables), AnimalSize::Small);
        // "cat" and "shepherd" both match; the large list wins.
        assert_eq!(estimate_size("Shepherd cat", &tables), AnimalSize::Large);
        assert_eq!(estimate_size("Poodle", &tables), AnimalSize::Medium);
        assert_eq!(estimate_size("", &tables), AnimalSize::Medium);
    }

    #[test]
    fn home_fit_penalizes_large_animals_in_apartments() {
        let tables = CategoryTables::standard();
        let mut pet = animal();
        let mut person = adopter();

        pet.breed = "Labrador".to_string();
        assert_eq!(home_fit(&pet, &person, &tables), 100);
        person.home_type = Some("apartment".to_string());
        assert_eq!(home_fit(&pet, &person, &tables), 40);
        person.home_type = Some("condo".to_string());
        assert_eq!(home_fit(&pet, &person, &tables), 40);

        pet.breed = "Beagle".to_string();
        assert_eq!(home_fit(&pet, &person, &tables), 85);
        person.home_type = Some("House".to_string());
        assert_eq!(home_fit(&pet, &person, &tables), 90);
    }

    #[test]
    fn home_fit_treats_absent_home_type_as_apartment() {
        let tables = CategoryTables::standard();
        let mut pet = animal();
        let mut person = adopter();
        pet.breed = "German Shepherd".to_string();
        person.home_type = None;

        assert_eq!(home_fit(&pet, &person, &tables), 40);
    }

    #[test]
    fn behavioral_penalties_stack() {
        let policy = BehaviorPolicy::standard();
        let mut pet = animal();
        let mut person = adopter();
        person.has_kids = true;
        person.has_other_pets = true;

        assert_eq!(behavioral_fit(&pet, &person, &policy), 100);

        pet.good_with_kids = false;
        assert_eq!(behavioral_fit(&pet, &person, &policy), 60);

        pet.good_with_dogs = false;
        assert_eq!(behavioral_fit(&pet, &person, &policy), 30);

        pet.good_with_kids = true;
        assert_eq!(behavioral_fit(&pet, &person, &policy), 70);
    }

    #[test]
    fn behavioral_penalties_ignore_flags_the_household_does_not_need() {
        let policy = BehaviorPolicy::standard();
        let mut pet = animal();
        let person = adopter();
        pet.good_with_kids = false;
        pet.good_with_dogs = false;

        assert_eq!(behavioral_fit(&pet, &person, &policy), 100);
    }

    #[test]
    fn behavioral_score_never_drops_below_floor() {
        let policy = BehaviorPolicy {
            kids_penalty: 60,
            other_pets_penalty: 50,
            floor: 10,
        };
        let mut pet = animal();
        let mut person = adopter();
        person.has_kids = true;
        person.has_other_pets = true;
        pet.good_with_kids = false;
        pet.good_with_dogs = false;

        assert_eq!(behavioral_fit(&pet, &person, &policy), 10);
    }

    #[test]
    fn special_needs_depends_on_commitment() {
        let mut pet = animal();
        let mut person = adopter();

        person.commitment_level = Some("low".to_string());
        assert_eq!(special_needs_capability(&pet, &person), 100);

        pet.special_needs = true;
        assert_eq!(special_needs_capability(&pet, &person), 30);
        person.commitment_level = Some("medium".to_string());
        assert_eq!(special_needs_capability(&pet, &person), 60);
        person.commitment_level = Some("HIGH".to_string());
        assert_eq!(special_needs_capability(&pet, &person), 95);
        person.commitment_level = Some("sometimes".to_string());
        assert_eq!(special_needs_capability(&pet, &person), 30);
        person.commitment_level = None;
        assert_eq!(special_needs_capability(&pet, &person), 60);
    }
}
