//! Shelter record loading and lookup.
//!
//! Records are read once from the intake CSV exports and never mutated for the lifetime of the
//! store. A missing or unreadable export is logged and treated as an empty collection so the
//! rest of the pipeline keeps running.

pub mod domain;
mod parser;
mod profile;

pub use domain::{AdopterId, AdopterRecord, AnimalId, AnimalRecord};
pub use profile::{AdopterProfile, AnimalProfile};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Failure reading one of the record exports.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("failed to read record export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory record collections with lookup by identifier.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    animals: Vec<AnimalRecord>,
    adopters: Vec<AdopterRecord>,
    animal_index: HashMap<AnimalId, usize>,
    adopter_index: HashMap<AdopterId, usize>,
}

impl RecordStore {
    pub fn new(animals: Vec<AnimalRecord>, adopters: Vec<AdopterRecord>) -> Self {
        let mut store = Self::default();
        for animal in animals {
            if store.animal_index.contains_key(&animal.animal_id) {
                warn!(animal_id = %animal.animal_id, "duplicate animal id, keeping first record");
                continue;
            }
            store
                .animal_index
                .insert(animal.animal_id.clone(), store.animals.len());
            store.animals.push(animal);
        }
        for adopter in adopters {
            if store.adopter_index.contains_key(&adopter.adopter_id) {
                warn!(adopter_id = %adopter.adopter_id, "duplicate adopter id, keeping first record");
                continue;
            }
            store
                .adopter_index
                .insert(adopter.adopter_id.clone(), store.adopters.len());
            store.adopters.push(adopter);
        }
        store
    }

    /// Load both exports, falling back to empty collections when a file cannot be read.
    pub fn load<A: AsRef<Path>, B: AsRef<Path>>(animals_path: A, adopters_path: B) -> Self {
        let animals = load_or_empty(animals_path.as_ref(), "animals", |file| {
            parser::parse_animals(file)
        });
        let adopters = load_or_empty(adopters_path.as_ref(), "adopters", |file| {
            parser::parse_adopters(file)
        });

        let store = Self::new(animals, adopters);
        info!(
            animals = store.animals.len(),
            adopters = store.adopters.len(),
            "record store loaded"
        );
        store
    }

    /// Strict variant used when the caller wants to surface read failures.
    pub fn from_readers<A: Read, B: Read>(
        animals: A,
        adopters: B,
    ) -> Result<Self, RecordStoreError> {
        let animals = parser::parse_animals(animals)?;
        let adopters = parser::parse_adopters(adopters)?;
        Ok(Self::new(animals, adopters))
    }

    pub fn animal(&self, id: &AnimalId) -> Option<&AnimalRecord> {
        self.animal_index
            .get(id)
            .and_then(|index| self.animals.get(*index))
    }

    pub fn adopter(&self, id: &AdopterId) -> Option<&AdopterRecord> {
        self.adopter_index
            .get(id)
            .and_then(|index| self.adopters.get(*index))
    }

    /// Animals in file order; ranking ties depend on this order.
    pub fn animals(&self) -> &[AnimalRecord] {
        &self.animals
    }

    pub fn adopters(&self) -> &[AdopterRecord] {
        &self.adopters
    }

    pub fn animal_profile(&self, id: &AnimalId) -> Option<AnimalProfile> {
        self.animal(id).map(AnimalProfile::from_record)
    }

    pub fn adopter_profile(&self, id: &AdopterId) -> Option<AdopterProfile> {
        self.adopter(id).map(AdopterProfile::from_record)
    }
}

fn load_or_empty<T>(
    path: &Path,
    kind: &'static str,
    parse: impl FnOnce(std::fs::File) -> Result<Vec<T>, csv::Error>,
) -> Vec<T> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), kind, error = %err, "record export unavailable, using empty collection");
            return Vec::new();
        }
    };

    match parse(file) {
        Ok(records) => records,
        Err(err) => {
            warn!(path = %path.display(), kind, error = %err, "record export unreadable, using empty collection");
            Vec::new()
        }
    }
}
