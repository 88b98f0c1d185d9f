use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use vise::cards::{
    CardService, EligibilityConfig, EventSink, InMemoryClientRegistry, RestrictedCountries,
};
use vise::config::{AppConfig, CardsConfig};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) started_at: Instant,
}

impl AppState {
    pub(crate) fn new(metrics: Arc<PrometheusHandle>) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
            started_at: Instant::now(),
        }
    }
}

pub(crate) fn eligibility_config(cards: &CardsConfig) -> EligibilityConfig {
    match &cards.restricted_countries {
        Some(countries) => EligibilityConfig::default()
            .with_restricted_countries(RestrictedCountries::new(countries.iter().cloned())),
        None => EligibilityConfig::default(),
    }
}

pub(crate) fn build_card_service<E>(
    config: &AppConfig,
    events: E,
) -> CardService<InMemoryClientRegistry, E>
where
    E: EventSink + 'static,
{
    CardService::new(
        Arc::new(InMemoryClientRegistry::default()),
        Arc::new(events),
        eligibility_config(&config.cards),
    )
    .with_environment(config.environment)
}
