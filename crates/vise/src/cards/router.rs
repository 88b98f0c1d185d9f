use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{PurchaseSubmission, RegistrationSubmission};
use super::events::EventSink;
use super::registry::ClientRegistry;
use super::service::{CardService, CardServiceError};
use super::validation::ValidationError;

/// Router builder exposing registration, purchase, and listing endpoints.
pub fn card_router<R, E>(service: Arc<CardService<R, E>>) -> Router
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    Router::new()
        .route("/client", post(register_handler::<R, E>))
        .route("/purchase", post(purchase_handler::<R, E>))
        .route("/clients", get(clients_handler::<R, E>))
        .with_state(service)
}

pub(crate) async fn register_handler<R, E>(
    State(service): State<Arc<CardService<R, E>>>,
    payload: Result<Json<RegistrationSubmission>, JsonRejection>,
) -> Response
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    let result = payload
        .map_err(malformed_body)
        .and_then(|Json(submission)| service.register_client(submission));

    match result {
        Ok(client) => (StatusCode::OK, Json(client.registration_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn purchase_handler<R, E>(
    State(service): State<Arc<CardService<R, E>>>,
    payload: Result<Json<PurchaseSubmission>, JsonRejection>,
) -> Response
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    let result = payload
        .map_err(malformed_body)
        .and_then(|Json(submission)| service.process_purchase(submission));

    match result {
        Ok(purchase) => {
            let payload = json!({
                "status": "Approved",
                "purchase": purchase,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clients_handler<R, E>(
    State(service): State<Arc<CardService<R, E>>>,
) -> Response
where
    R: ClientRegistry + 'static,
    E: EventSink + 'static,
{
    match service.clients() {
        Ok(clients) => {
            let payload = json!({
                "total": clients.len(),
                "clients": clients,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn malformed_body(rejection: JsonRejection) -> CardServiceError {
    CardServiceError::Validation(ValidationError::MalformedBody(rejection.body_text()))
}

fn error_response(err: CardServiceError) -> Response {
    let status = match &err {
        CardServiceError::Validation(_) | CardServiceError::Ineligible(_) => {
            StatusCode::BAD_REQUEST
        }
        CardServiceError::ClientNotFound(_) => StatusCode::NOT_FOUND,
        CardServiceError::CountryRestricted { .. } => StatusCode::FORBIDDEN,
        CardServiceError::Registry(_) => {
            let payload = json!({
                "status": "Error",
                "error": "internal error",
            });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response();
        }
    };

    let payload = json!({
        "status": "Rejected",
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
