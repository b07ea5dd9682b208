use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState};
use crate::routes::with_adoption_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use shelter_match::config::AppConfig;
use shelter_match::error::AppError;
use shelter_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = build_service(&config)?;
    info!(
        animals = service.records().animals().len(),
        adopters = service.records().adopters().len(),
        top_n = service.default_top_n(),
        "adoption service initialised"
    );
    let service = Arc::new(Mutex::new(service));

    let app = with_adoption_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "shelter match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
