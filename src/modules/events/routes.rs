use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::models::{Attendee, AttendeeDraft, Event, EventDraft};
use super::store::EventStore;
use crate::modules::support::parse_id;
use catalog_http::{error::AppError, extract::ApiJson};

pub fn router(store: Arc<EventStore>) -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{event_id}", get(get_event))
        .route(
            "/events/{event_id}/attendees",
            get(list_attendees).post(create_attendee),
        )
        .with_state(store)
}

async fn list_events(State(store): State<Arc<EventStore>>) -> Json<Vec<Event>> {
    Json(store.list().await)
}

async fn create_event(
    State(store): State<Arc<EventStore>>,
    ApiJson(draft): ApiJson<EventDraft>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let fields = draft.validate()?;
    let event = store.create(fields).await;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn get_event(
    State(store): State<Arc<EventStore>>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event_id = parse_id(&event_id, "event")?;
    Ok(Json(store.get(event_id).await?))
}

async fn list_attendees(
    State(store): State<Arc<EventStore>>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Attendee>>, AppError> {
    let event_id = parse_id(&event_id, "event")?;
    Ok(Json(store.attendees(event_id).await?))
}

async fn create_attendee(
    State(store): State<Arc<EventStore>>,
    Path(event_id): Path<String>,
    body: Result<ApiJson<AttendeeDraft>, AppError>,
) -> Result<(StatusCode, Json<Attendee>), AppError> {
    let event_id = parse_id(&event_id, "event")?;
    // Scope before body: an unknown event is a 404 whatever the payload.
    store.get(event_id).await?;
    let ApiJson(draft) = body?;
    let fields = draft.validate()?;
    let attendee = store.add_attendee(event_id, fields).await?;
    Ok((StatusCode::CREATED, Json(attendee)))
}
