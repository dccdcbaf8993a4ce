//! Gateways between canonical events and an event backend.
//!
//! [`EventGateway`] is the seam: [`HttpGateway`] talks to the remote events
//! API, [`MemoryGateway`] serves a local mock collection. Which one a session
//! uses is decided once, by [`connect`].

mod http;
mod memory;
pub mod wire;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{ConfigResult, GatewayResult};
use crate::event::{DeletedEvent, Event, EventPatch, NewEvent};

pub use http::HttpGateway;
pub use memory::MemoryGateway;

#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Fetch every event, surfacing failures.
    async fn fetch_all(&self) -> GatewayResult<Vec<Event>>;

    /// Fetch every event. Failures are logged and yield an empty list.
    async fn list(&self) -> Vec<Event> {
        match self.fetch_all().await {
            Ok(events) => events,
            Err(err) => {
                error!(error = %err, "Failed to list events");
                Vec::new()
            }
        }
    }

    async fn create(&self, event: &NewEvent) -> GatewayResult<Event>;

    async fn get_by_id(&self, id: &str) -> GatewayResult<Event>;

    /// Apply a partial update. Fields absent from `patch` are not sent.
    async fn update(&self, id: &str, patch: &EventPatch) -> GatewayResult<Event>;

    async fn delete(&self, id: &str) -> GatewayResult<DeletedEvent>;

    /// The fixed demo set used for seeding. The in-memory gateway also makes it
    /// its collection; the HTTP gateway writes nothing to the server.
    async fn demo_events(&self) -> GatewayResult<Vec<Event>>;
}

/// Build the gateway selected by `config`.
pub fn connect(config: &Config) -> ConfigResult<Arc<dyn EventGateway>> {
    if config.use_test_data {
        info!("Using in-memory test data");
        return Ok(Arc::new(MemoryGateway::seeded()));
    }

    let base_url = config.api_base()?;
    info!(api_base = %base_url, "Using remote events API");
    Ok(Arc::new(HttpGateway::new(base_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_test_data_uses_memory_gateway() {
        let config = Config {
            use_test_data: true,
            api_base: "not a url".to_string(),
            ..Config::default()
        };

        let gateway = connect(&config).unwrap();
        assert_eq!(gateway.list().await.len(), 2);
    }

    #[test]
    fn test_connect_rejects_invalid_api_base() {
        let config = Config {
            api_base: "not a url".to_string(),
            ..Config::default()
        };
        assert!(connect(&config).is_err());
    }
}
