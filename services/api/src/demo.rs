use crate::infra::eligibility_config;
use chrono::{Datelike, NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use std::sync::Arc;
use vise::cards::{
    CardService, CardServiceError, Client, InMemoryClientRegistry, NoopEventSink,
    PurchaseSubmission, RegistrationSubmission,
};
use vise::config::CardsConfig;
use vise::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Purchase date for the sample purchases (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Amount charged on every sample purchase.
    #[arg(long, default_value = "150")]
    pub(crate) amount: Decimal,
}

struct SampleClient {
    name: &'static str,
    country: &'static str,
    monthly_income: u32,
    vise_club: bool,
    card_type: &'static str,
}

const SAMPLE_CLIENTS: &[SampleClient] = &[
    SampleClient {
        name: "Ana",
        country: "Peru",
        monthly_income: 600,
        vise_club: false,
        card_type: "gold",
    },
    SampleClient {
        name: "Bruno",
        country: "Chile",
        monthly_income: 1200,
        vise_club: false,
        card_type: "platinum",
    },
    SampleClient {
        name: "Carla",
        country: "Colombia",
        monthly_income: 1500,
        vise_club: true,
        card_type: "platinum",
    },
    SampleClient {
        name: "Li",
        country: "China",
        monthly_income: 2500,
        vise_club: true,
        card_type: "black",
    },
    SampleClient {
        name: "Diego",
        country: "Mexico",
        monthly_income: 3200,
        vise_club: true,
        card_type: "white",
    },
];

const PURCHASE_COUNTRIES: &[&str] = &["home", "Argentina", "India"];

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let service = CardService::new(
        Arc::new(InMemoryClientRegistry::default()),
        Arc::new(NoopEventSink),
        eligibility_config(&CardsConfig::default()),
    );

    println!("VISE card demo");
    println!("\nRegistrations");
    let mut registered: Vec<Client> = Vec::new();
    for sample in SAMPLE_CLIENTS {
        let submission = RegistrationSubmission {
            name: Some(sample.name.to_string()),
            country: Some(sample.country.to_string()),
            monthly_income: Some(Decimal::from(sample.monthly_income)),
            vise_club: Some(sample.vise_club),
            card_type: Some(sample.card_type.to_string()),
        };
        match service.register_client(submission) {
            Ok(client) => {
                println!(
                    "- #{} {} ({}, {}): registered for {}",
                    client.id, client.name, client.country, sample.monthly_income, client.card_type
                );
                registered.push(client);
            }
            Err(CardServiceError::Ineligible(reason)) => println!(
                "- {} ({}, {}): rejected for {}: {}",
                sample.name,
                sample.country,
                sample.monthly_income,
                sample.card_type,
                reason.summary()
            ),
            Err(other) => return Err(other.into()),
        }
    }

    println!(
        "\nPurchases of {} USD on {} ({:?})",
        args.amount,
        date,
        date.weekday()
    );
    for client in &registered {
        for destination in PURCHASE_COUNTRIES {
            let country = if *destination == "home" {
                client.country.as_str()
            } else {
                destination
            };
            let submission = PurchaseSubmission {
                client_id: Some(client.id.0),
                amount: Some(args.amount),
                currency: Some("USD".to_string()),
                purchase_date: Some(date.format("%Y-%m-%d").to_string()),
                purchase_country: Some(country.to_string()),
            };
            match service.process_purchase(submission) {
                Ok(record) => println!(
                    "- #{} {} in {}: {} -> charged {} {}",
                    client.id,
                    client.card_type,
                    country,
                    record.benefit,
                    record.final_amount,
                    record.currency
                ),
                Err(CardServiceError::CountryRestricted { .. }) => println!(
                    "- #{} {} in {}: blocked by country restriction",
                    client.id, client.card_type, country
                ),
                Err(other) => return Err(other.into()),
            }
        }
    }

    Ok(())
}
