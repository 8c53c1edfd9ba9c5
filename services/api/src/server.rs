use crate::cli::ServeArgs;
use crate::infra::{
    default_scoring_config, AppState, InMemoryProgressRepository, InMemorySubscriptionStore,
    StaticIdentityProvider,
};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lessen::config::AppConfig;
use lessen::entitlements::{EntitlementResolver, EntitlementService};
use lessen::error::AppError;
use lessen::progress::ProgressService;
use lessen::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let progress_repository = Arc::new(InMemoryProgressRepository::default());
    let progress_service = Arc::new(ProgressService::new(
        progress_repository,
        default_scoring_config(),
    ));

    let subscription_store = Arc::new(InMemorySubscriptionStore::default());
    let identity = Arc::new(StaticIdentityProvider::from_env());
    let entitlement_service = Arc::new(EntitlementService::new(
        subscription_store,
        identity,
        EntitlementResolver::default(),
    ));

    let app = with_api_routes(progress_service, entitlement_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "progress service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
