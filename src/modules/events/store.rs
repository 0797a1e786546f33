//! In-memory event and attendee collections.

use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{Attendee, Event, NewAttendee, NewEvent};
use catalog_http::error::AppError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("event {0} not found")]
    EventNotFound(u64),
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        AppError::not_found(err.to_string())
    }
}

/// Events and their attendees behind one lock, so id assignment and
/// insertion happen together.
#[derive(Debug)]
pub struct EventStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Clone)]
struct Inner {
    events: Vec<Event>,
    attendees: Vec<Attendee>,
    next_event_id: u64,
    next_attendee_id: u64,
}

impl Inner {
    fn fixture() -> Self {
        let events = vec![
            event(1, "Reykjavik Jazz Night", "2024-03-14", "Harpa"),
            event(2, "Nordic Design Forum", "2024-04-02", "Hörpuhorn"),
            event(3, "Symphony Under the Aurora", "2024-04-20", "Eldborg"),
        ];
        let attendees = vec![
            attendee(1, 1, "Gudrun Jonsdottir", Some("gudrun@example.is")),
            attendee(2, 1, "Einar Olafsson", None),
            attendee(3, 2, "Sigrun Bjork", Some("sigrun@example.is")),
        ];

        Self {
            next_event_id: next_id(events.iter().map(|e| e.id)),
            next_attendee_id: next_id(attendees.iter().map(|a| a.id)),
            events,
            attendees,
        }
    }

    fn has_event(&self, id: u64) -> bool {
        self.events.iter().any(|event| event.id == id)
    }
}

impl EventStore {
    /// Create a store seeded with the fixture data.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::fixture()),
        }
    }

    /// Restore fixture contents and id counters.
    pub async fn reset(&self) {
        *self.inner.write().await = Inner::fixture();
        tracing::info!(target: "catalog.events", "event store reset to fixture");
    }

    pub async fn list(&self) -> Vec<Event> {
        self.inner.read().await.events.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Event, EventError> {
        self.inner
            .read()
            .await
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or(EventError::EventNotFound(id))
    }

    pub async fn create(&self, fields: NewEvent) -> Event {
        let mut inner = self.inner.write().await;
        let event = Event {
            id: inner.next_event_id,
            name: fields.name,
            date: fields.date,
            location: fields.location,
        };
        inner.next_event_id += 1;
        inner.events.push(event.clone());

        tracing::debug!(target: "catalog.events", id = event.id, "event created");
        event
    }

    /// Attendees of one event, in registration order.
    pub async fn attendees(&self, event_id: u64) -> Result<Vec<Attendee>, EventError> {
        let inner = self.inner.read().await;
        if !inner.has_event(event_id) {
            return Err(EventError::EventNotFound(event_id));
        }
        Ok(inner
            .attendees
            .iter()
            .filter(|attendee| attendee.event_id == event_id)
            .cloned()
            .collect())
    }

    pub async fn add_attendee(
        &self,
        event_id: u64,
        fields: NewAttendee,
    ) -> Result<Attendee, EventError> {
        let mut inner = self.inner.write().await;
        if !inner.has_event(event_id) {
            return Err(EventError::EventNotFound(event_id));
        }

        let attendee = Attendee {
            id: inner.next_attendee_id,
            event_id,
            name: fields.name,
            email: fields.email,
        };
        inner.next_attendee_id += 1;
        inner.attendees.push(attendee.clone());

        tracing::debug!(
            target: "catalog.events",
            id = attendee.id,
            event_id,
            "attendee registered"
        );
        Ok(attendee)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

fn event(id: u64, name: &str, date: &str, location: &str) -> Event {
    Event {
        id,
        name: name.to_string(),
        date: date.to_string(),
        location: location.to_string(),
    }
}

fn attendee(id: u64, event_id: u64, name: &str, email: Option<&str>) -> Attendee {
    Attendee {
        id,
        event_id,
        name: name.to_string(),
        email: email.map(str::to_string),
    }
}
