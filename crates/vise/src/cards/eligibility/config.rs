use rust_decimal::Decimal;

use super::super::domain::RestrictedCountries;

/// Income floors and geographic limits applied when a tier is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityConfig {
    pub gold_minimum_income: Decimal,
    pub platinum_minimum_income: Decimal,
    pub premium_minimum_income: Decimal,
    pub restricted_countries: RestrictedCountries,
}

impl EligibilityConfig {
    pub fn with_restricted_countries(mut self, restricted: RestrictedCountries) -> Self {
        self.restricted_countries = restricted;
        self
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            gold_minimum_income: Decimal::from(500),
            platinum_minimum_income: Decimal::from(1000),
            premium_minimum_income: Decimal::from(2000),
            restricted_countries: RestrictedCountries::default(),
        }
    }
}
