//! Article CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use eventdesk_core::portal::{Article, CreateArticleRequest, UpdateArticleRequest};

use crate::{
    handlers::{error::not_found, AppError},
    state::AppState,
};

const ARTICLES: &str = "articles";

/// List all articles, newest first (GET /api/articles).
pub async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, AppError> {
    Ok(Json(state.articles.list().await?))
}

/// Create a new article (POST /api/articles).
pub async fn create_article(
    State(state): State<AppState>,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let article = state.articles.create(payload).await?;

    tracing::info!(article_id = %article.id, title = %article.title, "Created article");

    Ok((StatusCode::CREATED, Json(article)))
}

/// Get a single article by ID (GET /api/articles/{id}).
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    state
        .articles
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ARTICLES, &id))
}

/// Update an article by ID (PUT /api/articles/{id}).
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<Json<Article>, AppError> {
    let article = state
        .articles
        .update(&id, payload)
        .await?
        .ok_or_else(|| not_found(ARTICLES, &id))?;

    tracing::info!(article_id = %id, "Updated article");

    Ok(Json(article))
}

/// Delete an article by ID (DELETE /api/articles/{id}).
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.articles.delete(&id).await? {
        return Err(not_found(ARTICLES, &id));
    }

    tracing::info!(article_id = %id, "Deleted article");

    Ok(StatusCode::NO_CONTENT)
}

/// Record one view of an article (POST /api/articles/{id}/views).
pub async fn record_article_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    state
        .articles
        .record_view(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(ARTICLES, &id))
}
