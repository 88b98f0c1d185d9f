use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use super::domain::{
    ClientId, PurchaseRequest, PurchaseSubmission, RegistrationRequest, RegistrationSubmission,
};

/// Largest purchase amount accepted, in whole currency units.
pub const MAX_PURCHASE_AMOUNT: i64 = 1_000_000_000_000_000;

/// Request-shape failures, reported before any business rule runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must not exceed {max}")]
    TooLarge { field: &'static str, max: i64 },
    #[error("purchaseDate '{0}' is not a recognizable date")]
    InvalidPurchaseDate(String),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// Checks registration payloads for the fields every tier needs.
pub fn validate_registration(
    submission: RegistrationSubmission,
) -> Result<RegistrationRequest, ValidationError> {
    let mut missing = Vec::new();
    let name = required_text(submission.name, "name", &mut missing);
    let country = required_text(submission.country, "country", &mut missing);
    if submission.monthly_income.is_none() {
        missing.push("monthlyIncome");
    }
    if submission.vise_club.is_none() {
        missing.push("viseClub");
    }
    let card_type = required_text(submission.card_type, "cardType", &mut missing);

    let (Some(name), Some(country), Some(monthly_income), Some(vise_club), Some(card_type)) = (
        name,
        country,
        submission.monthly_income,
        submission.vise_club,
        card_type,
    ) else {
        return Err(ValidationError::MissingFields(missing));
    };

    non_negative(monthly_income, "monthlyIncome")?;
    Ok(RegistrationRequest {
        name,
        country,
        monthly_income,
        vise_club,
        card_type,
    })
}

/// Checks purchase payloads and resolves the purchase date to a UTC instant.
pub fn validate_purchase(
    submission: PurchaseSubmission,
) -> Result<PurchaseRequest, ValidationError> {
    let mut missing = Vec::new();
    if submission.client_id.is_none() {
        missing.push("clientId");
    }
    if submission.amount.is_none() {
        missing.push("amount");
    }
    let currency = required_text(submission.currency, "currency", &mut missing);
    let purchase_date = required_text(submission.purchase_date, "purchaseDate", &mut missing);
    let purchase_country =
        required_text(submission.purchase_country, "purchaseCountry", &mut missing);

    let (
        Some(client_id),
        Some(amount),
        Some(currency),
        Some(purchase_date),
        Some(purchase_country),
    ) = (
        submission.client_id,
        submission.amount,
        currency,
        purchase_date,
        purchase_country,
    ) else {
        return Err(ValidationError::MissingFields(missing));
    };

    non_negative(amount, "amount")?;
    if amount > Decimal::from(MAX_PURCHASE_AMOUNT) {
        return Err(ValidationError::TooLarge {
            field: "amount",
            max: MAX_PURCHASE_AMOUNT,
        });
    }
    let purchased_at = parse_purchase_date(&purchase_date)?;

    Ok(PurchaseRequest {
        client_id: ClientId(client_id),
        amount,
        currency,
        purchase_date,
        purchased_at,
        purchase_country,
    })
}

/// Accepts RFC 3339 timestamps, naive timestamps (read as UTC), and bare dates.
pub fn parse_purchase_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(ValidationError::InvalidPurchaseDate(raw.to_string()))
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            missing.push(field);
            None
        }
    }
}

fn non_negative(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}
