use std::io::Cursor;
use std::sync::Arc;

use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::workflows::adoption::{adoption_router, AdoptionService};
use crate::workflows::records::RecordStore;
use crate::workflows::scoring::CompatibilityScorer;
use crate::workflows::sessions::{
    HistoryEntry, InMemorySessionPersistence, PersistenceError, SessionDocument,
    SessionPersistence,
};

pub(super) const ANIMALS: &str = "animal_id,name,species,breed,age_years,energy_level,good_with_kids,good_with_dogs,special_needs,behavioral_traits\n\
1,Max,Dog,Golden Retriever,3,high,yes,yes,no,friendly;playful\n\
2,Whiskers,Cat,tabby cat,8,low,no,no,yes,shy\n\
3,Biscuit,Dog,Beagle,2,medium,yes,yes,no,curious\n";

pub(super) const ADOPTERS: &str = "adopter_id,name,home_type,has_kids,has_other_pets,lifestyle,commitment_level,experience_level,preferences\n\
1,John Smith,house,yes,yes,active,medium,beginner,dogs\n\
2,Sarah Lee,apartment,yes,yes,busy,low,beginner,\n";

pub(super) fn records() -> Arc<RecordStore> {
    Arc::new(
        RecordStore::from_readers(Cursor::new(ANIMALS), Cursor::new(ADOPTERS))
            .expect("fixture records load"),
    )
}

pub(super) fn build_service() -> (
    AdoptionService<InMemorySessionPersistence>,
    Arc<InMemorySessionPersistence>,
) {
    let persistence = Arc::new(InMemorySessionPersistence::new());
    let service = AdoptionService::new(
        records(),
        Arc::new(CompatibilityScorer::standard()),
        persistence.clone(),
        3,
    );
    (service, persistence)
}

pub(super) fn shared(
    service: AdoptionService<InMemorySessionPersistence>,
) -> Arc<Mutex<AdoptionService<InMemorySessionPersistence>>> {
    Arc::new(Mutex::new(service))
}

pub(super) fn router() -> Router {
    let (service, _) = build_service();
    adoption_router(shared(service))
}

/// Storage that refuses every write.
#[derive(Debug, Default)]
pub(super) struct UnavailablePersistence;

impl SessionPersistence for UnavailablePersistence {
    fn save(&self, _document: &SessionDocument) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }

    fn load_history(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        Ok(Vec::new())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("encode body"),
        ))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}
