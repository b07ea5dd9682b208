use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for shelter animals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub String);

/// Identifier wrapper for prospective adopters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdopterId(pub String);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AdopterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnimalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for AdopterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Animal as listed by the shelter.
///
/// Categorical attributes stay as the raw text from the intake sheet; `None` means the
/// column was missing, while a blank cell is kept as an empty string. The scorer decides
/// how to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub animal_id: AnimalId,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age_years: u32,
    pub energy_level: Option<String>,
    pub good_with_kids: bool,
    pub good_with_dogs: bool,
    pub special_needs: bool,
    pub behavioral_traits: Vec<String>,
}

/// Prospective adopter as captured on the inquiry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterRecord {
    pub adopter_id: AdopterId,
    pub name: String,
    pub home_type: Option<String>,
    pub has_kids: bool,
    pub has_other_pets: bool,
    pub lifestyle: Option<String>,
    pub commitment_level: Option<String>,
    pub experience_level: Option<String>,
    pub preferences: Vec<String>,
}
