use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use super::service::{AdoptionService, AdoptionServiceError};
use crate::workflows::records::{AdopterId, AnimalId};
use crate::workflows::sessions::{
    AdoptionSession, SessionId, SessionPersistence, SessionStoreError,
};

/// The service behind one lock so session writes persist one at a time.
pub type SharedAdoptionService<P> = Arc<Mutex<AdoptionService<P>>>;

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub adopter_id: AdopterId,
    pub top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub animal_id: AnimalId,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct GuidanceRequest {
    pub animal_id: AnimalId,
    pub adopter_id: AdopterId,
    pub concern: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrainingQuery {
    pub behavior: String,
}

/// Session payload returned by the session endpoints.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    #[serde(flatten)]
    pub session: &'a AdoptionSession,
    pub summary: String,
}

impl<'a> SessionView<'a> {
    pub fn new(session: &'a AdoptionSession) -> Self {
        Self {
            session,
            summary: session.summary(),
        }
    }
}

/// Router builder exposing matching, inquiry, session, and history endpoints.
pub fn adoption_router<P>(service: SharedAdoptionService<P>) -> Router
where
    P: SessionPersistence + 'static,
{
    Router::new()
        .route(
            "/api/v1/adopters/:adopter_id/matches",
            get(matches_handler::<P>),
        )
        .route(
            "/api/v1/adopters/:adopter_id/history",
            get(history_handler::<P>),
        )
        .route(
            "/api/v1/animals/:animal_id/adopters/:adopter_id/match",
            get(detailed_match_handler::<P>),
        )
        .route(
            "/api/v1/animals/:animal_id/training",
            get(training_handler::<P>),
        )
        .route("/api/v1/inquiries", post(inquiry_handler::<P>))
        .route("/api/v1/sessions/:session_id", get(session_handler::<P>))
        .route(
            "/api/v1/sessions/:session_id/selection",
            post(selection_handler::<P>),
        )
        .route(
            "/api/v1/sessions/:session_id/completion",
            post(completion_handler::<P>),
        )
        .route(
            "/api/v1/sessions/:session_id/feedback",
            post(feedback_handler::<P>),
        )
        .route("/api/v1/guidance", post(guidance_handler::<P>))
        .route("/api/v1/statistics", get(statistics_handler::<P>))
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn service_error_response(error: AdoptionServiceError) -> Response {
    match error {
        AdoptionServiceError::UnknownAnimal(_)
        | AdoptionServiceError::Session(SessionStoreError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, error.to_string())
        }
        other => {
            tracing::error!(error = %other, "adoption request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

fn session_response(status: StatusCode, session: &AdoptionSession) -> Response {
    (status, axum::Json(SessionView::new(session))).into_response()
}

pub(crate) async fn matches_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(adopter_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    if query.top_n == Some(0) {
        return error_response(StatusCode::BAD_REQUEST, "top_n must be a positive integer");
    }

    let service = service.lock().await;
    let matches = service.find_matches(&AdopterId(adopter_id), query.top_n);
    (StatusCode::OK, axum::Json(matches)).into_response()
}

pub(crate) async fn detailed_match_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path((animal_id, adopter_id)): Path<(String, String)>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    match service.detailed_match(&AnimalId(animal_id), &AdopterId(adopter_id)) {
        Some(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "animal or adopter not found"),
    }
}

pub(crate) async fn inquiry_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    axum::Json(request): axum::Json<InquiryRequest>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    if request.top_n == Some(0) {
        return error_response(StatusCode::BAD_REQUEST, "top_n must be a positive integer");
    }

    let mut service = service.lock().await;
    match service.process_inquiry(&request.adopter_id, request.top_n) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn session_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    match service.session(&SessionId(session_id)) {
        Some(session) => session_response(StatusCode::OK, session),
        None => error_response(StatusCode::NOT_FOUND, "session not found"),
    }
}

pub(crate) async fn selection_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<SelectionRequest>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let mut service = service.lock().await;
    match service.select_animal(&SessionId(session_id), request.animal_id) {
        Ok(session) => session_response(StatusCode::OK, &session),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn completion_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let mut service = service.lock().await;
    match service.complete_adoption(&SessionId(session_id)) {
        Ok(session) => session_response(StatusCode::OK, &session),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn feedback_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<FeedbackRequest>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let mut service = service.lock().await;
    match service.add_feedback(&SessionId(session_id), request.feedback) {
        Ok(session) => session_response(StatusCode::OK, &session),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn history_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(adopter_id): Path<String>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    let history = service.adopter_history(&AdopterId(adopter_id));
    (StatusCode::OK, axum::Json(history)).into_response()
}

pub(crate) async fn statistics_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    (StatusCode::OK, axum::Json(service.match_statistics())).into_response()
}

pub(crate) async fn guidance_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    axum::Json(request): axum::Json<GuidanceRequest>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    match service.guidance_for(
        &request.animal_id,
        &request.adopter_id,
        request.concern.as_deref(),
    ) {
        Some(guidance) => (StatusCode::OK, axum::Json(guidance)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "animal or adopter not found"),
    }
}

pub(crate) async fn training_handler<P>(
    State(service): State<SharedAdoptionService<P>>,
    Path(animal_id): Path<String>,
    Query(query): Query<TrainingQuery>,
) -> Response
where
    P: SessionPersistence + 'static,
{
    let service = service.lock().await;
    let animal_id = AnimalId(animal_id);
    match service.training_tips(&animal_id, &query.behavior) {
        Some(tips) => {
            let payload = json!({ "animal_id": animal_id, "tips": tips });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "animal not found"),
    }
}
