use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub const SERVICE_NAME: &str = "vise-api";

/// Kinds of events the card service reports to its logging collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ClientCreated,
    PurchaseCompleted,
    Error,
}

impl EventType {
    pub const fn label(self) -> &'static str {
        match self {
            EventType::ClientCreated => "client_created",
            EventType::PurchaseCompleted => "purchase_completed",
            EventType::Error => "error",
        }
    }
}

/// Structured event handed to an [`EventSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub data: Value,
    pub metadata: BTreeMap<String, String>,
}

impl ServiceEvent {
    pub fn new(event_type: EventType, data: Value, environment: &str) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("service".to_string(), SERVICE_NAME.to_string());
        metadata.insert("environment".to_string(), environment.to_string());
        Self {
            timestamp: Utc::now(),
            event_type,
            data,
            metadata,
        }
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// Outbound logging port. Callers treat delivery as fire-and-forget.
pub trait EventSink: Send + Sync {
    fn record(&self, event: ServiceEvent) -> Result<(), EventError>;
}

/// Event dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
    #[error("event could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Writes every event to the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: ServiceEvent) -> Result<(), EventError> {
        let data = serde_json::to_string(&event.data)?;
        let metadata = serde_json::to_string(&event.metadata)?;
        match event.event_type {
            EventType::Error => tracing::error!(
                event_type = event.event_type.label(),
                timestamp = %event.timestamp,
                %data,
                %metadata,
                "service event"
            ),
            _ => tracing::info!(
                event_type = event.event_type.label(),
                timestamp = %event.timestamp,
                %data,
                %metadata,
                "service event"
            ),
        }
        Ok(())
    }
}

/// Discards events; useful where no logging collaborator is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record(&self, _event: ServiceEvent) -> Result<(), EventError> {
        Ok(())
    }
}
