//! HTTP gateway for the remote events API.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    /events/`     list (`{ "items": [...] }`)
//! - `POST   /events/`     create
//! - `GET    /events/{id}` read
//! - `PUT    /events/{id}` update
//! - `DELETE /events/{id}` delete

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::EventGateway;
use super::wire::{self, CreateEventRequest, UpdateEventRequest};
use crate::demo;
use crate::error::{GatewayError, GatewayResult};
use crate::event::{DeletedEvent, Event, EventPatch, NewEvent};
use crate::normalize::normalize;

/// Client for the remote events API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        HttpGateway { http, base_url }
    }

    /// `{base}/events/`
    fn collection_url(&self) -> GatewayResult<Url> {
        self.url_with(&["events", ""])
    }

    /// `{base}/events/{id}`
    fn event_url(&self, id: &str) -> GatewayResult<Url> {
        self.url_with(&["events", id])
    }

    fn url_with(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::Transport(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Status text carried by operation-specific failures.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[async_trait]
impl EventGateway for HttpGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Event>> {
        let url = self.collection_url()?;
        debug!(%url, "GET events");

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(GatewayError::ListFailed(status_text(resp.status())));
        }

        let payload: Value = resp.json().await?;
        let items = wire::list_items(payload)?;
        Ok(items.iter().map(normalize).collect())
    }

    async fn create(&self, event: &NewEvent) -> GatewayResult<Event> {
        let url = self.collection_url()?;
        debug!(%url, title = %event.title, "POST event");

        let resp = self
            .http
            .post(url)
            .json(&CreateEventRequest::from(event))
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = GatewayError::CreateFailed(status_text(resp.status()));
            error!(error = %err, "Create rejected by server");
            return Err(err);
        }

        let record: Value = resp.json().await?;
        Ok(normalize(&record))
    }

    async fn get_by_id(&self, id: &str) -> GatewayResult<Event> {
        let url = self.event_url(id)?;
        debug!(%url, "GET event");

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            error!(id, status = %resp.status(), "Event lookup failed");
            return Err(GatewayError::NotFound(id.to_string()));
        }

        let record: Value = resp.json().await?;
        Ok(normalize(&record))
    }

    async fn update(&self, id: &str, patch: &EventPatch) -> GatewayResult<Event> {
        let url = self.event_url(id)?;
        debug!(%url, "PUT event");

        let resp = self
            .http
            .put(url)
            .json(&UpdateEventRequest::from(patch))
            .send()
            .await?;

        if !resp.status().is_success() {
            let err = GatewayError::UpdateFailed(status_text(resp.status()));
            error!(id, error = %err, "Update rejected by server");
            return Err(err);
        }

        let record: Value = resp.json().await?;
        Ok(normalize(&record))
    }

    async fn delete(&self, id: &str) -> GatewayResult<DeletedEvent> {
        let url = self.event_url(id)?;
        debug!(%url, "DELETE event");

        let resp = self.http.delete(url).send().await?;
        if !resp.status().is_success() {
            let err = GatewayError::DeleteFailed(status_text(resp.status()));
            error!(id, error = %err, "Delete rejected by server");
            return Err(err);
        }

        // Body ignored: the server usually answers 204
        Ok(DeletedEvent { id: id.to_string() })
    }

    /// The demo set is built locally; nothing is written to the server.
    async fn demo_events(&self) -> GatewayResult<Vec<Event>> {
        Ok(demo::demo_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_collection_url_keeps_trailing_slash() {
        let gw = gateway("http://localhost:8000/api");
        assert_eq!(
            gw.collection_url().unwrap().as_str(),
            "http://localhost:8000/api/events/"
        );

        let gw = gateway("http://localhost:8000/api/");
        assert_eq!(
            gw.collection_url().unwrap().as_str(),
            "http://localhost:8000/api/events/"
        );
    }

    #[test]
    fn test_event_url_escapes_id() {
        let gw = gateway("http://localhost:8000/api");
        assert_eq!(
            gw.event_url("abc 1/2").unwrap().as_str(),
            "http://localhost:8000/api/events/abc%201%2F2"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(StatusCode::BAD_REQUEST), "Bad Request");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }
}
