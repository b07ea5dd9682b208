use std::path::Path;
use std::sync::Arc;

use shelter_match::workflows::{
    adoption::AdoptionService,
    records::{AdopterId, AnimalId, RecordStore},
    scoring::CompatibilityScorer,
    sessions::{JsonFileSessionPersistence, SessionPersistence},
};

const ANIMALS: &str = "animal_id,name,species,breed,age_years,energy_level,good_with_kids,good_with_dogs,special_needs,behavioral_traits\n\
1,Max,Dog,Golden Retriever,3,high,yes,yes,no,friendly;playful\n\
2,Whiskers,Cat,tabby cat,8,low,no,no,yes,shy\n\
3,Biscuit,Dog,Beagle,2,medium,yes,yes,no,curious\n\
4,Luna,Dog,German Shepherd,5,,yes,no,no,\n";

const ADOPTERS: &str = "adopter_id,name,home_type,has_kids,has_other_pets,lifestyle,commitment_level,experience_level,preferences\n\
1,John Smith,house,yes,yes,active,medium,beginner,dogs;outdoor\n\
2,Sarah Lee,apartment,yes,yes,busy,low,beginner,\n";

fn write_exports(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let animals = dir.join("animal_data.csv");
    let adopters = dir.join("adopter_data.csv");
    std::fs::write(&animals, ANIMALS).expect("write animals");
    std::fs::write(&adopters, ADOPTERS).expect("write adopters");
    (animals, adopters)
}

fn service(
    dir: &Path,
) -> AdoptionService<JsonFileSessionPersistence> {
    let (animals, adopters) = write_exports(dir);
    let records = Arc::new(RecordStore::load(animals, adopters));
    AdoptionService::new(
        records,
        Arc::new(CompatibilityScorer::standard()),
        Arc::new(JsonFileSessionPersistence::new(dir.join("sessions.json"))),
        3,
    )
}

#[test]
fn inquiry_from_csv_exports_to_completed_adoption() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut service = service(dir.path());

    let outcome = service
        .process_inquiry(&AdopterId::from("1"), None)
        .expect("inquiry succeeds");
    let top = outcome.top_match().expect("top match");
    assert_eq!(top.animal_name, "Max");
    assert_eq!(top.score, 98);
    assert!(top.reasoning.starts_with("Match Analysis: Max \u{2194} John Smith"));

    let session_id = outcome.session_id.clone();
    service
        .select_animal(&session_id, AnimalId::from("1"))
        .expect("select");
    service
        .add_feedback(&session_id, "Max is perfect! Very friendly.")
        .expect("feedback");
    let session = service.complete_adoption(&session_id).expect("complete");
    assert!(session.is_completed());

    let raw = std::fs::read_to_string(dir.path().join("sessions.json")).expect("document written");
    let document: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(document["sessions"][0]["session_state"]["status"], "completed");
    assert!(document["sessions"][0]["matches"][0]["reasoning"]
        .as_str()
        .is_some_and(|reasoning| reasoning.contains("Experience Match: 90/100")));
    assert_eq!(document["match_history"].as_array().map(Vec::len), Some(3));
}

#[test]
fn blank_energy_level_takes_the_table_fallback() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = service(dir.path());

    // Luna: blank energy (fallback ordinal 2) vs active lifestyle -> 70; large dog, not good with dogs.
    let detail = service
        .detailed_match(&AnimalId::from("4"), &AdopterId::from("1"))
        .expect("records exist");
    assert_eq!(detail.breakdown.lifestyle_match, 70);
    assert_eq!(detail.breakdown.home_fit, 100);
    assert_eq!(detail.breakdown.behavioral_fit, 70);
}

#[test]
fn history_survives_restart_but_sessions_do_not() {
    let dir = tempfile::tempdir().expect("tempdir");
    let session_id = {
        let mut service = service(dir.path());
        service
            .process_inquiry(&AdopterId::from("2"), Some(2))
            .expect("inquiry succeeds")
            .session_id
    };

    let restarted = service(dir.path());
    assert!(restarted.session(&session_id).is_none());

    let history = restarted.adopter_history(&AdopterId::from("2"));
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].animal_name, "Biscuit");
    assert_eq!(history[0].score, 86);

    let stats = restarted.match_statistics();
    assert_eq!(stats.total_matches, 2);
    assert_eq!(stats.total_adopters, 1);
}

#[test]
fn missing_exports_give_empty_rankings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = Arc::new(RecordStore::load(
        dir.path().join("nope-animals.csv"),
        dir.path().join("nope-adopters.csv"),
    ));
    let persistence = Arc::new(JsonFileSessionPersistence::new(dir.path().join("s.json")));
    let service = AdoptionService::new(
        records,
        Arc::new(CompatibilityScorer::standard()),
        persistence.clone(),
        3,
    );

    assert!(service.find_matches(&AdopterId::from("1"), None).is_empty());
    assert!(persistence.load_history().expect("no document yet").is_empty());
}
