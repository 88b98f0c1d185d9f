//! End-to-end scenarios for registration and purchases through the public service
//! facade and HTTP router.

mod common {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use serde_json::Value;

    use vise::cards::{
        CardService, EligibilityConfig, InMemoryClientRegistry, NoopEventSink,
    };

    pub(super) type Service = CardService<InMemoryClientRegistry, NoopEventSink>;

    pub(super) fn service() -> Arc<Service> {
        Arc::new(CardService::new(
            Arc::new(InMemoryClientRegistry::default()),
            Arc::new(NoopEventSink),
            EligibilityConfig::default(),
        ))
    }

    pub(super) fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    pub(super) async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }
}

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use std::collections::HashSet;
use tower::ServiceExt;
use vise::cards::{card_router, ClientId, RegistrationSubmission};

#[tokio::test]
async fn gold_client_registers_then_earns_tuesday_discount() {
    let router = card_router(service());

    let registered = router
        .clone()
        .oneshot(post_json(
            "/client",
            json!({
                "name": "A",
                "country": "Peru",
                "monthlyIncome": 600,
                "viseClub": false,
                "cardType": "gold"
            }),
        ))
        .await
        .expect("registration executes");
    assert_eq!(registered.status(), StatusCode::OK);
    let body = read_json(registered).await;
    assert_eq!(body["status"], "Registered");
    assert_eq!(body["clientId"], 1);

    let purchased = router
        .oneshot(post_json(
            "/purchase",
            json!({
                "clientId": 1,
                "amount": 150,
                "currency": "USD",
                "purchaseDate": "2025-01-14T15:00:00Z",
                "purchaseCountry": "Peru"
            }),
        ))
        .await
        .expect("purchase executes");
    assert_eq!(purchased.status(), StatusCode::OK);
    let body = read_json(purchased).await;
    assert_eq!(body["status"], "Approved");
    assert_eq!(body["purchase"]["benefit"], "Discount 15%");
    assert_eq!(body["purchase"]["discountApplied"], 22.5);
    assert_eq!(body["purchase"]["finalAmount"], 127.5);
}

#[tokio::test]
async fn black_card_from_restricted_country_is_rejected() {
    let router = card_router(service());

    let response = router
        .oneshot(post_json(
            "/client",
            json!({
                "name": "Li",
                "country": "China",
                "monthlyIncome": 2500,
                "viseClub": true,
                "cardType": "black"
            }),
        ))
        .await
        .expect("registration executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["status"], "Rejected");
    assert!(body["error"].as_str().unwrap_or_default().contains("China"));
}

#[tokio::test]
async fn platinum_abroad_weekday_purchase_does_not_stack() {
    let router = card_router(service());

    let registered = router
        .clone()
        .oneshot(post_json(
            "/client",
            json!({
                "name": "P",
                "country": "Peru",
                "monthlyIncome": 1000,
                "viseClub": true,
                "cardType": "Platinum"
            }),
        ))
        .await
        .expect("registration executes");
    assert_eq!(registered.status(), StatusCode::OK);

    let purchased = router
        .oneshot(post_json(
            "/purchase",
            json!({
                "clientId": 1,
                "amount": 150,
                "currency": "USD",
                "purchaseDate": "2025-01-13",
                "purchaseCountry": "Chile"
            }),
        ))
        .await
        .expect("purchase executes");
    let body = read_json(purchased).await;
    assert_eq!(body["purchase"]["benefit"], "Discount 20%");
    assert_eq!(body["purchase"]["finalAmount"], 120.0);
}

#[tokio::test]
async fn concurrent_registrations_get_unique_sequential_ids() {
    let service = service();
    let tasks: Vec<_> = (0..64)
        .map(|n| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register_client(RegistrationSubmission {
                        name: Some(format!("client-{n}")),
                        country: Some("Peru".to_string()),
                        monthly_income: Some(rust_decimal::Decimal::from(750)),
                        vise_club: Some(n % 2 == 0),
                        card_type: Some("gold".to_string()),
                    })
                    .expect("registration succeeds")
                    .id
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let id = task.await.expect("task completes");
        assert!(ids.insert(id), "duplicate id {id}");
    }
    let expected: HashSet<ClientId> = (1..=64).map(ClientId).collect();
    assert_eq!(ids, expected);

    let listed: Vec<u64> = service
        .clients()
        .expect("list clients")
        .iter()
        .map(|client| client.id.0)
        .collect();
    assert_eq!(listed, (1..=64).collect::<Vec<u64>>());
}
