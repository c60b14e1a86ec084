//! User profile handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use eventdesk_core::portal::{CreateUserRequest, UpdateUserRequest, UserProfile};

use crate::{
    handlers::{error::not_found, AppError},
    state::AppState,
};

const USERS: &str = "users";

/// Create a user profile (POST /api/users).
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.users.create(payload).await?;

    tracing::info!(user_id = %profile.id, "Created user profile");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Get a user profile (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    state
        .users
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(USERS, &id))
}

/// Update a user profile (PUT /api/users/{id}).
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .users
        .update(&id, payload)
        .await?
        .ok_or_else(|| not_found(USERS, &id))?;

    tracing::info!(user_id = %id, "Updated user profile");

    Ok(Json(profile))
}

/// Delete a user profile (DELETE /api/users/{id}).
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.users.delete(&id).await? {
        return Err(not_found(USERS, &id));
    }

    tracing::info!(user_id = %id, "Deleted user profile");

    Ok(StatusCode::NO_CONTENT)
}
