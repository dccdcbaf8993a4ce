//! Event store: the canonical collection, the active filter and the selection.
//!
//! State only changes through [`reduce`], which consumes the previous state
//! and an [`Action`] and returns the next state. `filtered_events` is
//! recomputed inline on every transition touching `events` or `filter`, so it
//! is never stale once a dispatch returns.

use tracing::debug;

use crate::event::Event;
use crate::filter::{self, EventFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Full, unfiltered collection in insertion order
    pub events: Vec<Event>,
    /// Always `filter::apply(&events, &filter)`
    pub filtered_events: Vec<Event>,
    pub filter: EventFilter,
    /// Target of an in-progress edit
    pub selected_event: Option<Event>,
    /// True until the first load has been applied
    pub loading: bool,
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState {
            events: Vec::new(),
            filtered_events: Vec::new(),
            filter: EventFilter::default(),
            selected_event: None,
            loading: true,
        }
    }
}

/// Store transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the collection wholesale
    Load(Vec<Event>),
    Add(Event),
    /// Replace the event with the same id, keeping its position
    Update(Event),
    /// Remove the event with this id
    Delete(String),
    SetFilter(EventFilter),
    SetSelected(Option<Event>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Load(_) => "load",
            Action::Add(_) => "add",
            Action::Update(_) => "update",
            Action::Delete(_) => "delete",
            Action::SetFilter(_) => "set_filter",
            Action::SetSelected(_) => "set_selected",
        }
    }
}

/// Compute the next state.
pub fn reduce(mut state: StoreState, action: Action) -> StoreState {
    match action {
        Action::Load(events) => recompute(StoreState {
            events,
            loading: false,
            ..state
        }),

        Action::Add(event) => {
            state.events.push(event);
            recompute(state)
        }

        Action::Update(updated) => {
            let events = state
                .events
                .into_iter()
                .map(|event| {
                    if event.id == updated.id {
                        updated.clone()
                    } else {
                        event
                    }
                })
                .collect();
            recompute(StoreState {
                events,
                selected_event: None,
                ..state
            })
        }

        Action::Delete(id) => {
            state.events.retain(|event| event.id != id);
            state.selected_event = None;
            recompute(state)
        }

        Action::SetFilter(filter) => recompute(StoreState { filter, ..state }),

        Action::SetSelected(selected_event) => StoreState {
            selected_event,
            ..state
        },
    }
}

fn recompute(mut state: StoreState) -> StoreState {
    state.filtered_events = filter::apply(&state.events, &state.filter);
    state
}

/// Container owning the current [`StoreState`].
#[derive(Debug, Default)]
pub struct EventStore {
    state: StoreState,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Apply `action`, replacing the state wholesale.
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "Dispatching store action");
        let previous = std::mem::take(&mut self.state);
        self.state = reduce(previous, action);
    }

    pub fn events(&self) -> &[Event] {
        &self.state.events
    }

    pub fn filtered_events(&self) -> &[Event] {
        &self.state.filtered_events
    }

    pub fn filter(&self) -> &EventFilter {
        &self.state.filter
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.state.selected_event.as_ref()
    }
}
