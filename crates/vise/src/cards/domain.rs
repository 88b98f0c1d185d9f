use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sequential identifier handed out by the client registry, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Card tiers offered by the service, ordered from entry level to premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Classic,
    Gold,
    Platinum,
    Black,
    White,
}

impl CardType {
    /// Case-insensitive parse of a requested tier. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            "black" => Some(Self::Black),
            "white" => Some(Self::White),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CardType::Classic => "Classic",
            CardType::Gold => "Gold",
            CardType::Platinum => "Platinum",
            CardType::Black => "Black",
            CardType::White => "White",
        }
    }

    /// Black and White cards carry the geographic restrictions.
    pub const fn is_premium(self) -> bool {
        matches!(self, CardType::Black | CardType::White)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercased comparison key for free-text country names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryKey(String);

impl CountryKey {
    pub fn new(country: &str) -> Self {
        Self(country.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Countries from which Black/White cardholders may neither register nor transact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedCountries {
    names: Vec<String>,
    keys: Vec<CountryKey>,
}

impl RestrictedCountries {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let keys = names.iter().map(|name| CountryKey::new(name)).collect();
        Self { names, keys }
    }

    pub fn contains(&self, country: &CountryKey) -> bool {
        self.keys.iter().any(|key| key == country)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for RestrictedCountries {
    fn default() -> Self {
        Self::new(["China", "Vietnam", "India", "Irán", "Iran"])
    }
}

/// A registered cardholder. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "clientId")]
    pub id: ClientId,
    pub name: String,
    pub country: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_income: Decimal,
    pub vise_club: bool,
    pub card_type: CardType,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn country_key(&self) -> CountryKey {
        CountryKey::new(&self.country)
    }

    pub fn registration_view(&self) -> RegistrationView {
        RegistrationView {
            client_id: self.id,
            name: self.name.clone(),
            card_type: self.card_type,
            status: "Registered",
            message: format!("Client eligible for a {} card", self.card_type),
        }
    }
}

/// Attributes of a client that passed validation and eligibility, awaiting an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub vise_club: bool,
    pub card_type: CardType,
    pub created_at: DateTime<Utc>,
}

impl NewClient {
    pub fn into_client(self, id: ClientId) -> Client {
        Client {
            id,
            name: self.name,
            country: self.country,
            monthly_income: self.monthly_income,
            vise_club: self.vise_club,
            card_type: self.card_type,
            created_at: self.created_at,
        }
    }
}

/// Raw registration payload; every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub monthly_income: Option<Decimal>,
    #[serde(default)]
    pub vise_club: Option<bool>,
    #[serde(default)]
    pub card_type: Option<String>,
}

/// Registration payload with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub vise_club: bool,
    pub card_type: String,
}

/// Raw purchase payload; every field is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSubmission {
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub purchase_country: Option<String>,
}

/// Purchase payload with every required field present and the date resolved to UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    pub client_id: ClientId,
    pub amount: Decimal,
    pub currency: String,
    pub purchase_date: String,
    pub purchased_at: DateTime<Utc>,
    pub purchase_country: String,
}

/// Transient result of an approved purchase. Returned and logged, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub client_id: ClientId,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_applied: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    pub benefit: String,
    pub currency: String,
    pub purchase_date: String,
    pub purchase_country: String,
    pub processed_at: DateTime<Utc>,
}

/// Response body for a successful registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationView {
    pub client_id: ClientId,
    pub name: String,
    pub card_type: CardType,
    pub status: &'static str,
    pub message: String,
}
