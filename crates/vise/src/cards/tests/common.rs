use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::cards::domain::{
    Client, ClientId, NewClient, PurchaseSubmission, RegistrationSubmission,
};
use crate::cards::eligibility::{EligibilityConfig, EligibilityEvaluator};
use crate::cards::events::{EventError, EventSink, EventType, ServiceEvent};
use crate::cards::registry::{ClientRegistry, InMemoryClientRegistry, RegistryError};
use crate::cards::{card_router, CardService};

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(EligibilityConfig::default())
}

/// Midday UTC on the given January 2025 day (13th is a Monday, 19th a Sunday).
pub(super) fn january(day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 1, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid date")
        .and_utc()
}

pub(super) fn registration(
    card_type: &str,
    income: Decimal,
    vise_club: bool,
    country: &str,
) -> RegistrationSubmission {
    RegistrationSubmission {
        name: Some("Ana Torres".to_string()),
        country: Some(country.to_string()),
        monthly_income: Some(income),
        vise_club: Some(vise_club),
        card_type: Some(card_type.to_string()),
    }
}

pub(super) fn purchase(
    client_id: ClientId,
    amount: Decimal,
    purchase_date: &str,
    country: &str,
) -> PurchaseSubmission {
    PurchaseSubmission {
        client_id: Some(client_id.0),
        amount: Some(amount),
        currency: Some("USD".to_string()),
        purchase_date: Some(purchase_date.to_string()),
        purchase_country: Some(country.to_string()),
    }
}

pub(super) fn build_service() -> (
    CardService<InMemoryClientRegistry, MemoryEvents>,
    Arc<InMemoryClientRegistry>,
    Arc<MemoryEvents>,
) {
    let registry = Arc::new(InMemoryClientRegistry::default());
    let events = Arc::new(MemoryEvents::default());
    let service =
        CardService::new(registry.clone(), events.clone(), EligibilityConfig::default());
    (service, registry, events)
}

pub(super) fn card_router_with_service(
    service: CardService<InMemoryClientRegistry, MemoryEvents>,
) -> axum::Router {
    card_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<ServiceEvent>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<ServiceEvent> {
        self.events.lock().expect("event mutex poisoned").clone()
    }

    pub(super) fn of_type(&self, event_type: EventType) -> Vec<ServiceEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.event_type == event_type)
            .collect()
    }
}

impl EventSink for MemoryEvents {
    fn record(&self, event: ServiceEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push(event);
        Ok(())
    }
}

pub(super) struct FailingEvents;

impl EventSink for FailingEvents {
    fn record(&self, _event: ServiceEvent) -> Result<(), EventError> {
        Err(EventError::Transport("collector offline".to_string()))
    }
}

pub(super) struct UnavailableRegistry;

impl ClientRegistry for UnavailableRegistry {
    fn register(&self, _client: NewClient) -> Result<Client, RegistryError> {
        Err(RegistryError::Unavailable("storage offline".to_string()))
    }

    fn find_by_id(&self, _id: ClientId) -> Result<Option<Client>, RegistryError> {
        Err(RegistryError::Unavailable("storage offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Client>, RegistryError> {
        Err(RegistryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
