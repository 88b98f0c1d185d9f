use rust_decimal::Decimal;

use super::super::domain::{CardType, CountryKey};
use super::config::EligibilityConfig;
use super::policy::{RejectionReason, TierGroup};

/// Normalized inputs shared by every tier check.
pub(crate) struct Applicant<'a> {
    pub monthly_income: Decimal,
    pub vise_club: bool,
    pub country: &'a str,
}

pub(crate) fn check_tier(
    card_type: CardType,
    applicant: &Applicant<'_>,
    config: &EligibilityConfig,
) -> Result<(), RejectionReason> {
    match card_type {
        CardType::Classic => Ok(()),
        CardType::Gold => require_income(applicant, TierGroup::Gold, config.gold_minimum_income),
        CardType::Platinum => {
            require_income(applicant, TierGroup::Platinum, config.platinum_minimum_income)?;
            require_vise_club(applicant, TierGroup::Platinum)
        }
        CardType::Black | CardType::White => {
            require_income(applicant, TierGroup::BlackWhite, config.premium_minimum_income)?;
            require_vise_club(applicant, TierGroup::BlackWhite)?;
            if config
                .restricted_countries
                .contains(&CountryKey::new(applicant.country))
            {
                return Err(RejectionReason::RestrictedCountry {
                    card_type,
                    country: applicant.country.to_string(),
                });
            }
            Ok(())
        }
    }
}

fn require_income(
    applicant: &Applicant<'_>,
    tier: TierGroup,
    required: Decimal,
) -> Result<(), RejectionReason> {
    if applicant.monthly_income >= required {
        Ok(())
    } else {
        Err(RejectionReason::InsufficientIncome { tier, required })
    }
}

fn require_vise_club(applicant: &Applicant<'_>, tier: TierGroup) -> Result<(), RejectionReason> {
    if applicant.vise_club {
        Ok(())
    } else {
        Err(RejectionReason::MissingViseClub { tier })
    }
}
