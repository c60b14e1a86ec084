//! Event CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use eventdesk_core::portal::{CreateEventRequest, Event, UpdateEventRequest};

use crate::{
    handlers::{error::not_found, AppError},
    state::AppState,
};

const EVENTS: &str = "events";

/// List all events (GET /api/events).
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(state.events.list().await?))
}

/// Create a new event (POST /api/events).
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.events.create(payload).await?;

    tracing::info!(event_id = %event.id, title = %event.title, "Created event");

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get a single event by ID (GET /api/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    state
        .events
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(EVENTS, &id))
}

/// Update an event by ID (PUT /api/events/{id}).
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .events
        .update(&id, payload)
        .await?
        .ok_or_else(|| not_found(EVENTS, &id))?;

    tracing::info!(event_id = %id, "Updated event");

    Ok(Json(event))
}

/// Delete an event by ID (DELETE /api/events/{id}).
///
/// Its activities stay in storage; only their cached list is dropped.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.events.delete(&id).await? {
        return Err(not_found(EVENTS, &id));
    }

    tracing::info!(event_id = %id, "Deleted event");

    Ok(StatusCode::NO_CONTENT)
}
