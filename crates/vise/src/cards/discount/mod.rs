mod pricing;
mod rules;

pub use pricing::{benefit_label, price_purchase, PricedPurchase};
pub use rules::DiscountRuleKind;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{CardType, CountryKey};
use rules::{rules_for, Trigger};

/// One rule that fired for a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountCandidate {
    pub rule: DiscountRuleKind,
    pub percent: u8,
}

/// The best single benefit for a purchase plus every rule that qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountQuote {
    pub percent: u8,
    pub candidates: Vec<DiscountCandidate>,
}

/// Stateless calculator applying the per-tier discount table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCalculator;

impl DiscountCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Candidates never stack: the quote carries the largest triggered percentage.
    pub fn calculate(
        &self,
        card_type: CardType,
        amount: Decimal,
        purchased_at: DateTime<Utc>,
        purchase_country: &CountryKey,
        home_country: &CountryKey,
    ) -> DiscountQuote {
        let weekday = purchased_at.weekday();
        let abroad = purchase_country != home_country;

        let candidates: Vec<DiscountCandidate> = rules_for(card_type)
            .iter()
            .filter(|rule| match rule.trigger {
                Trigger::Spend { days, over } => {
                    days.contains(&weekday) && amount > Decimal::from(over)
                }
                Trigger::Abroad => abroad,
            })
            .map(|rule| DiscountCandidate {
                rule: rule.kind,
                percent: rule.percent,
            })
            .collect();

        let percent = candidates
            .iter()
            .map(|candidate| candidate.percent)
            .max()
            .unwrap_or(0);

        DiscountQuote {
            percent,
            candidates,
        }
    }
}
