use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionSink, ServiceDraftStore};
use crate::routes::with_onboarding_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use tracing::info;

use onboarding::config::AppConfig;
use onboarding::error::AppError;
use onboarding::telemetry;
use onboarding::wizard::OnboardingWizard;

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

    let drafts = Arc::new(ServiceDraftStore::from_config(&config.drafts));
    let sink = Arc::new(InMemorySubmissionSink::default());
    let session = Arc::new(Mutex::new(OnboardingWizard::new(drafts, sink)));

    let app = with_onboarding_routes(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "employee onboarding service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
