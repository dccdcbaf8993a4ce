//! Event operations: gateway calls committed into the store.
//!
//! Each async operation marks itself in flight, awaits the gateway, then
//! dispatches the matching store transition. Failures set a user-facing
//! error message. Mutations (create, update, delete, seed) return the
//! failure so callers can keep their own state, e.g. leave a form open.
//! Fetch failures are absorbed: the list is emptied and the error is set.
//!
//! Several operations may be in flight at once. Store transitions are
//! applied in completion order, with no merging between them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info};

use crate::error::{GatewayError, GatewayResult};
use crate::event::{Event, EventPatch, NewEvent};
use crate::filter::EventFilter;
use crate::gateway::EventGateway;
use crate::store::{Action, EventStore, StoreState};

const FETCH_FAILED: &str = "Could not load events";
const CREATE_FAILED: &str = "Could not create the event";
const UPDATE_FAILED: &str = "Could not update the event";
const DELETE_FAILED: &str = "Could not delete the event";
const LOAD_FAILED: &str = "Could not load the event";
const SEED_FAILED: &str = "Could not initialize demo data";

/// Loading/error bookkeeping shared by all operations of one facade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationStatus {
    /// Number of operations currently awaiting the gateway
    pub in_flight: usize,
    /// Message of the most recently failed operation, cleared when any operation starts
    pub error: Option<String>,
}

/// Store state plus operation status, as presented to a UI.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsView {
    pub events: Vec<Event>,
    pub filtered_events: Vec<Event>,
    pub filter: EventFilter,
    pub selected_event: Option<Event>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct EventOperations {
    gateway: Arc<dyn EventGateway>,
    store: Mutex<EventStore>,
    status: Mutex<OperationStatus>,
}

/// Marks one operation in flight; the mark is removed on drop, whatever the outcome.
struct InFlight<'a> {
    status: &'a Mutex<OperationStatus>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut status = lock(self.status);
        status.in_flight = status.in_flight.saturating_sub(1);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Message shown for `err`, or `fallback` if the failure carries none.
fn user_message(err: &GatewayError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl EventOperations {
    pub fn new(gateway: Arc<dyn EventGateway>) -> Self {
        Self::with_store(gateway, EventStore::new())
    }

    pub fn with_store(gateway: Arc<dyn EventGateway>, store: EventStore) -> Self {
        EventOperations {
            gateway,
            store: Mutex::new(store),
            status: Mutex::new(OperationStatus::default()),
        }
    }

    // STATUS + STATE:

    pub fn state(&self) -> StoreState {
        lock(&self.store).state().clone()
    }

    pub fn status(&self) -> OperationStatus {
        lock(&self.status).clone()
    }

    /// True while any operation is in flight or before the first load.
    pub fn loading(&self) -> bool {
        lock(&self.status).in_flight > 0 || lock(&self.store).state().loading
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.status).error.clone()
    }

    pub fn view(&self) -> EventsView {
        let state = self.state();
        let status = self.status();
        EventsView {
            loading: status.in_flight > 0 || state.loading,
            error: status.error,
            events: state.events,
            filtered_events: state.filtered_events,
            filter: state.filter,
            selected_event: state.selected_event,
        }
    }

    fn begin(&self) -> InFlight<'_> {
        let mut status = lock(&self.status);
        status.in_flight += 1;
        status.error = None;
        InFlight {
            status: &self.status,
        }
    }

    fn fail(&self, err: &GatewayError, fallback: &str) {
        let message = user_message(err, fallback);
        error!(error = %message, "Event operation failed");
        lock(&self.status).error = Some(message);
    }

    fn dispatch(&self, action: Action) {
        lock(&self.store).dispatch(action);
    }

    // GATEWAY OPERATIONS:

    /// Load every event into the store. Never fails: on error the store is
    /// emptied, the error is recorded and an empty list is returned.
    pub async fn fetch_events(&self) -> Vec<Event> {
        let _in_flight = self.begin();

        match self.gateway.fetch_all().await {
            Ok(events) => {
                info!(count = events.len(), "Loaded events");
                self.dispatch(Action::Load(events.clone()));
                events
            }
            Err(err) => {
                self.fail(&err, FETCH_FAILED);
                self.dispatch(Action::Load(Vec::new()));
                Vec::new()
            }
        }
    }

    pub async fn create_event(&self, event: NewEvent) -> GatewayResult<Event> {
        let _in_flight = self.begin();

        let created = self
            .gateway
            .create(&event)
            .await
            .inspect_err(|err| self.fail(err, CREATE_FAILED))?;

        info!(id = %created.id, "Created event");
        self.dispatch(Action::Add(created.clone()));
        Ok(created)
    }

    pub async fn update_event(&self, id: &str, patch: EventPatch) -> GatewayResult<Event> {
        let _in_flight = self.begin();

        let updated = self
            .gateway
            .update(id, &patch)
            .await
            .inspect_err(|err| self.fail(err, UPDATE_FAILED))?;

        info!(id = %updated.id, "Updated event");
        self.dispatch(Action::Update(updated.clone()));
        Ok(updated)
    }

    pub async fn delete_event(&self, id: &str) -> GatewayResult<()> {
        let _in_flight = self.begin();

        let deleted = self
            .gateway
            .delete(id)
            .await
            .inspect_err(|err| self.fail(err, DELETE_FAILED))?;

        info!(id = %deleted.id, "Deleted event");
        self.dispatch(Action::Delete(deleted.id));
        Ok(())
    }

    /// Fetch one event and make it the selection (target of an edit).
    pub async fn load_event(&self, id: &str) -> GatewayResult<Event> {
        let _in_flight = self.begin();

        let event = self
            .gateway
            .get_by_id(id)
            .await
            .inspect_err(|err| self.fail(err, LOAD_FAILED))?;

        self.dispatch(Action::SetSelected(Some(event.clone())));
        Ok(event)
    }

    /// Replace the collection with the gateway's demo set.
    pub async fn seed_demo_data(&self) -> GatewayResult<Vec<Event>> {
        let _in_flight = self.begin();

        let events = self
            .gateway
            .demo_events()
            .await
            .inspect_err(|err| self.fail(err, SEED_FAILED))?;

        info!(count = events.len(), "Seeded demo events");
        self.dispatch(Action::Load(events.clone()));
        Ok(events)
    }

    // UI STATE:

    pub fn select_event(&self, event: Option<Event>) {
        self.dispatch(Action::SetSelected(event));
    }

    pub fn update_filters(&self, filter: EventFilter) {
        self.dispatch(Action::SetFilter(filter));
    }
}
