//! Card registration and purchase workflow.
//!
//! Requests are validated, checked against the tier eligibility rules, and stored in
//! the client registry. Purchases by registered clients are priced with the best
//! single discount their tier earns for the day, amount, and country.

pub mod discount;
pub mod domain;
pub mod eligibility;
pub mod events;
pub mod registry;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use discount::{DiscountCalculator, DiscountCandidate, DiscountQuote, DiscountRuleKind};
pub use domain::{
    CardType, Client, ClientId, CountryKey, NewClient, PurchaseRecord, PurchaseRequest,
    PurchaseSubmission, RegistrationRequest, RegistrationSubmission, RegistrationView,
    RestrictedCountries,
};
pub use eligibility::{
    EligibilityConfig, EligibilityDecision, EligibilityEvaluator, RejectionReason, TierGroup,
};
pub use events::{EventError, EventSink, EventType, NoopEventSink, ServiceEvent, TracingEventSink};
pub use registry::{ClientRegistry, InMemoryClientRegistry, RegistryError};
pub use router::card_router;
pub use service::{CardService, CardServiceError};
pub use validation::ValidationError;
