use crate::cli::ServeArgs;
use crate::infra::{build_card_service, AppState};
use crate::routes::build_app;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use vise::cards::TracingEventSink;
use vise::config::AppConfig;
use vise::error::AppError;
use vise::telemetry;

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
    let app_state = AppState::new(Arc::new(prometheus_handle));
    let readiness_flag = app_state.readiness.clone();

    let card_service = Arc::new(build_card_service(&config, TracingEventSink));

    let app = build_app(card_service, app_state, &config.server.frontend_dir)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        frontend = %config.server.frontend_dir.display(),
        "VISE API ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
