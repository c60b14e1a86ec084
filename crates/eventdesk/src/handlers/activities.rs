//! Activity CRUD handlers, nested under their event.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use eventdesk_core::portal::{Activity, CreateActivityRequest, UpdateActivityRequest};

use crate::{
    handlers::{error::not_found, AppError},
    state::AppState,
};

const ACTIVITIES: &str = "activities";

/// Fails with 404 unless the parent event exists.
async fn require_event(state: &AppState, event_id: &str) -> Result<(), AppError> {
    if state.events.exists(event_id).await? {
        Ok(())
    } else {
        Err(not_found("events", event_id))
    }
}

/// List an event's activities (GET /api/events/{event_id}/activities).
pub async fn list_activities(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Activity>>, AppError> {
    require_event(&state, &event_id).await?;
    Ok(Json(state.activities.list(&event_id).await?))
}

/// Create an activity (POST /api/events/{event_id}/activities).
pub async fn create_activity(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_event(&state, &event_id).await?;
    let activity = state.activities.create(&event_id, payload).await?;

    tracing::info!(%event_id, activity_id = %activity.id, "Created activity");

    Ok((StatusCode::CREATED, Json(activity)))
}

/// Get one activity (GET /api/events/{event_id}/activities/{id}).
pub async fn get_activity(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(String, String)>,
) -> Result<Json<Activity>, AppError> {
    state
        .activities
        .get(&event_id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ACTIVITIES, &id))
}

/// Update an activity (PUT /api/events/{event_id}/activities/{id}).
pub async fn update_activity(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(String, String)>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, AppError> {
    let activity = state
        .activities
        .update(&event_id, &id, payload)
        .await?
        .ok_or_else(|| not_found(ACTIVITIES, &id))?;

    tracing::info!(%event_id, activity_id = %id, "Updated activity");

    Ok(Json(activity))
}

/// Delete an activity (DELETE /api/events/{event_id}/activities/{id}).
pub async fn delete_activity(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if !state.activities.delete(&event_id, &id).await? {
        return Err(not_found(ACTIVITIES, &id));
    }

    tracing::info!(%event_id, activity_id = %id, "Deleted activity");

    Ok(StatusCode::NO_CONTENT)
}
