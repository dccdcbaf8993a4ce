//! In-memory gateway over a local mock collection.
//!
//! Behaves like the remote API without any network I/O: records are stored
//! in wire shape semantics and every returned event goes through the
//! normalizer. Used for test data and UI work without a backend.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::EventGateway;
use super::wire::EventRecord;
use crate::demo;
use crate::error::{GatewayError, GatewayResult};
use crate::event::{DeletedEvent, Event, EventPatch, NewEvent};
use crate::normalize::normalize;

#[derive(Debug, Default)]
pub struct MemoryGateway {
    events: RwLock<Vec<Event>>,
    latency: Option<Duration>,
}

impl MemoryGateway {
    pub fn new(events: Vec<Event>) -> Self {
        MemoryGateway {
            events: RwLock::new(events),
            latency: None,
        }
    }

    /// Gateway holding the two sample events.
    pub fn seeded() -> Self {
        Self::new(demo::sample_events())
    }

    /// Delay every call by `latency`, simulating a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Current contents of the mock collection.
    pub async fn snapshot(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

/// Pass a stored event through the wire shape and back, as a server would.
fn echo(event: &Event) -> GatewayResult<Event> {
    Ok(normalize(&EventRecord::from(event).to_value()?))
}

#[async_trait]
impl EventGateway for MemoryGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Event>> {
        self.round_trip().await;
        self.events.read().await.iter().map(echo).collect()
    }

    async fn create(&self, event: &NewEvent) -> GatewayResult<Event> {
        self.round_trip().await;

        let stored = echo(&Event {
            id: Uuid::new_v4().to_string(),
            title: event.title.clone(),
            date: event.date,
            description: event.description.clone(),
            importance: event.importance.clone(),
        })?;
        debug!(id = %stored.id, "Created mock event");

        self.events.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: &str) -> GatewayResult<Event> {
        self.round_trip().await;

        let events = self.events.read().await;
        let event = events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        echo(event)
    }

    async fn update(&self, id: &str, patch: &EventPatch) -> GatewayResult<Event> {
        self.round_trip().await;

        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;

        let updated = echo(&patch.apply_to(slot))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> GatewayResult<DeletedEvent> {
        self.round_trip().await;

        let mut events = self.events.write().await;
        let position = events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        events.remove(position);

        Ok(DeletedEvent { id: id.to_string() })
    }

    async fn demo_events(&self) -> GatewayResult<Vec<Event>> {
        self.round_trip().await;

        let demo = demo::demo_events();
        *self.events.write().await = demo.clone();
        Ok(demo)
    }
}
