use metrics_exporter_prometheus::PrometheusHandle;
use shelter_match::config::AppConfig;
use shelter_match::error::AppError;
use shelter_match::workflows::adoption::AdoptionService;
use shelter_match::workflows::records::RecordStore;
use shelter_match::workflows::scoring::{CompatibilityScorer, ScoringConfig};
use shelter_match::workflows::sessions::JsonFileSessionPersistence;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Scoring policy from `APP_SCORING_CONFIG`, or the standard one. Any violation is fatal.
pub(crate) fn load_scorer(config: &AppConfig) -> Result<CompatibilityScorer, AppError> {
    let scoring = match &config.matching.scoring_config {
        Some(path) => {
            info!(path = %path.display(), "loading scoring policy");
            ScoringConfig::from_path(path)?
        }
        None => ScoringConfig::standard(),
    };
    Ok(CompatibilityScorer::new(scoring)?)
}

/// Wire records, scorer, and on-disk session storage from configuration.
pub(crate) fn build_service(
    config: &AppConfig,
) -> Result<AdoptionService<JsonFileSessionPersistence>, AppError> {
    let scorer = Arc::new(load_scorer(config)?);
    let records = Arc::new(RecordStore::load(
        &config.data.animals_csv,
        &config.data.adopters_csv,
    ));
    let persistence = Arc::new(JsonFileSessionPersistence::new(
        config.data.session_store.clone(),
    ));

    Ok(AdoptionService::new(
        records,
        scorer,
        persistence,
        config.matching.default_top_n,
    ))
}
