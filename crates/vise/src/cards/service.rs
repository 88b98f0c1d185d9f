use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use super::discount::{benefit_label, price_purchase, DiscountCalculator};
use super::domain::{
    CardType, Client, ClientId, CountryKey, NewClient, PurchaseRecord, PurchaseSubmission,
    RegistrationSubmission,
};
use super::eligibility::{
    EligibilityConfig, EligibilityDecision, EligibilityEvaluator, RejectionReason,
};
use super::events::{EventSink, EventType, ServiceEvent};
use super::registry::{ClientRegistry, RegistryError};
use super::validation::{
    validate_purchase, validate_registration, ValidationError, MAX_PURCHASE_AMOUNT,
};
use crate::config::AppEnvironment;

/// Service composing validation, the eligibility and discount engines, the
/// registry, and the logging port.
pub struct CardService<R, E> {
    registry: Arc<R>,
    events: Arc<E>,
    eligibility: EligibilityEvaluator,
    discounts: DiscountCalculator,
    environment: AppEnvironment,
}

impl<R, E> CardService<R, E>
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    pub fn new(registry: Arc<R>, events: Arc<E>, config: EligibilityConfig) -> Self {
        Self {
            registry,
            events,
            eligibility: EligibilityEvaluator::new(config),
            discounts: DiscountCalculator::new(),
            environment: AppEnvironment::Development,
        }
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Validate, check eligibility, and store a new client.
    pub fn register_client(
        &self,
        submission: RegistrationSubmission,
    ) -> Result<Client, CardServiceError> {
        let request = validate_registration(submission)?;

        let decision = self.eligibility.evaluate(
            Some(request.monthly_income),
            Some(request.vise_club),
            &request.card_type,
            &request.country,
        );
        let card_type = match decision {
            EligibilityDecision::Eligible(card_type) => card_type,
            EligibilityDecision::Rejected(reason) => {
                info!(
                    card_type = %request.card_type,
                    reason = %reason.summary(),
                    "registration rejected"
                );
                return Err(CardServiceError::Ineligible(reason));
            }
        };

        let client = self
            .registry
            .register(NewClient {
                name: request.name,
                country: request.country,
                monthly_income: request.monthly_income,
                vise_club: request.vise_club,
                card_type,
                created_at: Utc::now(),
            })
            .map_err(|err| self.internal_error("register_client", err))?;

        info!(client_id = %client.id, %card_type, "client registered");
        self.emit(
            ServiceEvent::new(
                EventType::ClientCreated,
                json!(client),
                self.environment.label(),
            )
            .with_metadata("action", "registration"),
        );

        Ok(client)
    }

    /// Validate a purchase, apply the country gate, and price it.
    pub fn process_purchase(
        &self,
        submission: PurchaseSubmission,
    ) -> Result<PurchaseRecord, CardServiceError> {
        let request = validate_purchase(submission)?;

        let client = self
            .registry
            .find_by_id(request.client_id)
            .map_err(|err| self.internal_error("process_purchase", err))?
            .ok_or(CardServiceError::ClientNotFound(request.client_id))?;

        let purchase_country = CountryKey::new(&request.purchase_country);
        if client.card_type.is_premium()
            && self
                .eligibility
                .config()
                .restricted_countries
                .contains(&purchase_country)
        {
            info!(
                client_id = %client.id,
                country = %request.purchase_country,
                "purchase blocked by country restriction"
            );
            return Err(CardServiceError::CountryRestricted {
                card_type: client.card_type,
                country: request.purchase_country,
            });
        }

        let quote = self.discounts.calculate(
            client.card_type,
            request.amount,
            request.purchased_at,
            &purchase_country,
            &client.country_key(),
        );
        debug!(client_id = %client.id, ?quote, "discount quote");

        let priced = price_purchase(request.amount, quote.percent).ok_or(
            ValidationError::TooLarge {
                field: "amount",
                max: MAX_PURCHASE_AMOUNT,
            },
        )?;
        let record = PurchaseRecord {
            client_id: client.id,
            original_amount: request.amount,
            discount_applied: priced.discount_applied,
            final_amount: priced.final_amount,
            benefit: benefit_label(quote.percent),
            currency: request.currency,
            purchase_date: request.purchase_date,
            purchase_country: request.purchase_country,
            processed_at: Utc::now(),
        };

        self.emit(
            ServiceEvent::new(
                EventType::PurchaseCompleted,
                json!(record),
                self.environment.label(),
            )
            .with_metadata("action", "transaction"),
        );

        Ok(record)
    }

    /// Registered clients in identifier order.
    pub fn clients(&self) -> Result<Vec<Client>, CardServiceError> {
        self.registry
            .list()
            .map_err(|err| self.internal_error("list_clients", err))
    }

    fn internal_error(&self, operation: &str, err: RegistryError) -> CardServiceError {
        self.emit(
            ServiceEvent::new(
                EventType::Error,
                json!({ "message": err.to_string(), "operation": operation }),
                self.environment.label(),
            )
            .with_metadata("severity", "error"),
        );
        CardServiceError::Registry(err)
    }

    fn emit(&self, event: ServiceEvent) {
        let event_type = event.event_type;
        if let Err(err) = self.events.record(event) {
            warn!(
                event_type = event_type.label(),
                error = %err,
                "failed to record service event"
            );
        }
    }
}

/// Error raised by the card service.
#[derive(Debug, thiserror::Error)]
pub enum CardServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", .0.summary())]
    Ineligible(RejectionReason),
    #[error("client {0} is not registered")]
    ClientNotFound(ClientId),
    #[error("a client with a {card_type} card cannot make purchases from {country}")]
    CountryRestricted { card_type: CardType, country: String },
    #[error(transparent)]
    Registry(RegistryError),
}
