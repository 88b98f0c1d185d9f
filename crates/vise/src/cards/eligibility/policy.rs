use rust_decimal::Decimal;
use serde::Serialize;

use super::super::domain::CardType;

/// Outcome of an eligibility check for a requested tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EligibilityDecision {
    Eligible(CardType),
    Rejected(RejectionReason),
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible(_))
    }

    /// Human-readable reason, present only for rejections.
    pub fn reason(&self) -> Option<String> {
        match self {
            EligibilityDecision::Eligible(_) => None,
            EligibilityDecision::Rejected(reason) => Some(reason.summary()),
        }
    }
}

/// Why a client cannot hold the requested card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RejectionReason {
    InsufficientIncome {
        tier: TierGroup,
        required: Decimal,
    },
    MissingViseClub {
        tier: TierGroup,
    },
    RestrictedCountry {
        card_type: CardType,
        country: String,
    },
    InvalidCardType(String),
}

/// Tiers sharing a requirement are reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TierGroup {
    Gold,
    Platinum,
    BlackWhite,
}

impl TierGroup {
    pub const fn label(self) -> &'static str {
        match self {
            TierGroup::Gold => "Gold",
            TierGroup::Platinum => "Platinum",
            TierGroup::BlackWhite => "Black/White",
        }
    }
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::InsufficientIncome { tier, required } => format!(
                "client does not meet the minimum monthly income of {} USD required for {}",
                required.normalize(),
                tier.label()
            ),
            RejectionReason::MissingViseClub { tier } => format!(
                "client does not have the VISE CLUB subscription required for {}",
                tier.label()
            ),
            RejectionReason::RestrictedCountry { card_type, country } => format!(
                "clients residing in {country} cannot apply for a {card_type} card"
            ),
            RejectionReason::InvalidCardType(raw) => format!("invalid card type '{raw}'"),
        }
    }
}
