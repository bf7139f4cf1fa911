use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_collection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::telemetry;
use hireflow::workflows::documents::{
    DocumentCatalog, DocumentCollectionService, FanoutNotifier, InMemoryCollectionStore,
    TracingNotifier,
};
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
    let catalog = DocumentCatalog::new(config.documents.types.clone());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog.clone()),
    };

    let store = Arc::new(InMemoryCollectionStore::default());
    let notifier = Arc::new(FanoutNotifier::new().with_sink(Arc::new(TracingNotifier)));
    let collection_service = Arc::new(DocumentCollectionService::new(store, notifier, catalog));

    let app = with_collection_routes(collection_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "document collection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
