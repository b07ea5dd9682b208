use super::domain::{AdopterId, AdopterRecord, AnimalId, AnimalRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

/// Parse animal rows, skipping rows that cannot be decoded.
pub(crate) fn parse_animals<R: Read>(reader: R) -> Result<Vec<AnimalRecord>, csv::Error> {
    parse_rows::<R, AnimalRow>(reader)
        .map(|rows| rows.into_iter().filter_map(AnimalRow::into_record).collect())
}

/// Parse adopter rows, skipping rows that cannot be decoded.
pub(crate) fn parse_adopters<R: Read>(reader: R) -> Result<Vec<AdopterRecord>, csv::Error> {
    parse_rows::<R, AdopterRow>(reader)
        .map(|rows| rows.into_iter().filter_map(AdopterRow::into_record).collect())
}

fn parse_rows<R, T>(reader: R) -> Result<Vec<T>, csv::Error>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Surface a broken header as a whole-file failure.
    csv_reader.headers()?;

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => warn!(row = index + 1, error = %err, "skipping malformed record row"),
        }
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct AnimalRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    animal_id: Option<String>,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    species: String,
    #[serde(default)]
    breed: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age_years: Option<String>,
    #[serde(default, deserialize_with = "present_as_some")]
    energy_level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    good_with_kids: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    good_with_dogs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    special_needs: Option<String>,
    #[serde(default)]
    behavioral_traits: String,
}

impl AnimalRow {
    fn into_record(self) -> Option<AnimalRecord> {
        let Some(animal_id) = self.animal_id else {
            warn!(name = %self.name, "skipping animal row without animal_id");
            return None;
        };

        let age_years = match self.age_years.as_deref().map(str::parse::<u32>) {
            Some(Ok(age)) => age,
            Some(Err(_)) => {
                warn!(%animal_id, "unreadable age_years, defaulting to 0");
                0
            }
            None => 0,
        };

        Some(AnimalRecord {
            animal_id: AnimalId(animal_id),
            name: self.name,
            species: self.species,
            breed: self.breed,
            age_years,
            energy_level: self.energy_level,
            good_with_kids: is_yes(self.good_with_kids.as_deref()),
            good_with_dogs: is_yes(self.good_with_dogs.as_deref()),
            special_needs: is_yes(self.special_needs.as_deref()),
            behavioral_traits: split_tags(&self.behavioral_traits),
        })
    }
}

#[derive(Debug, Deserialize)]
struct AdopterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    adopter_id: Option<String>,
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default, deserialize_with = "present_as_some")]
    home_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_kids: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_other_pets: Option<String>,
    #[serde(default, deserialize_with = "present_as_some")]
    lifestyle: Option<String>,
    #[serde(default, deserialize_with = "present_as_some")]
    commitment_level: Option<String>,
    #[serde(default, deserialize_with = "present_as_some")]
    experience_level: Option<String>,
    #[serde(default)]
    preferences: String,
}

impl AdopterRow {
    fn into_record(self) -> Option<AdopterRecord> {
        let Some(adopter_id) = self.adopter_id else {
            warn!(name = %self.name, "skipping adopter row without adopter_id");
            return None;
        };

        Some(AdopterRecord {
            adopter_id: AdopterId(adopter_id),
            name: self.name,
            home_type: self.home_type,
            has_kids: is_yes(self.has_kids.as_deref()),
            has_other_pets: is_yes(self.has_other_pets.as_deref()),
            lifestyle: self.lifestyle,
            commitment_level: self.commitment_level,
            experience_level: self.experience_level,
            preferences: split_tags(&self.preferences),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Keeps a blank categorical cell as `Some("")`; only a missing column reads as `None`.
fn present_as_some<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// Intake sheets record flags as `yes`/`no`; anything other than `yes` reads as false.
pub(crate) fn is_yes(value: Option<&str>) -> bool {
    value
        .map(|raw| raw.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub(crate) fn split_tags(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
