mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{EligibilityDecision, RejectionReason, TierGroup};

use rust_decimal::Decimal;
use rules::{check_tier, Applicant};

use super::domain::CardType;

/// Stateless evaluator deciding whether a client may hold a requested tier.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
}

impl EligibilityEvaluator {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Missing income counts as zero and a missing subscription as absent.
    pub fn evaluate(
        &self,
        monthly_income: Option<Decimal>,
        vise_club: Option<bool>,
        card_type: &str,
        country: &str,
    ) -> EligibilityDecision {
        let Some(card_type) = CardType::parse(card_type) else {
            return EligibilityDecision::Rejected(RejectionReason::InvalidCardType(
                card_type.to_string(),
            ));
        };

        let applicant = Applicant {
            monthly_income: monthly_income.unwrap_or(Decimal::ZERO),
            vise_club: vise_club.unwrap_or(false),
            country,
        };

        match check_tier(card_type, &applicant, &self.config) {
            Ok(()) => EligibilityDecision::Eligible(card_type),
            Err(reason) => EligibilityDecision::Rejected(reason),
        }
    }
}
