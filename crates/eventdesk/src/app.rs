use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        activities::{
            create_activity, delete_activity, get_activity, list_activities, update_activity,
        },
        articles::{
            create_article, delete_article, get_article, list_articles, record_article_view,
            update_article,
        },
        events::{create_event, delete_event, get_event, list_events, update_event},
        health::{healthz, livez},
        users::{create_user, delete_user, get_user, update_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Article routes
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/articles/{id}/views", post(record_article_view))
        // Event routes
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        // Activity routes
        .route(
            "/events/{event_id}/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/events/{event_id}/activities/{id}",
            get(get_activity)
                .put(update_activity)
                .delete(delete_activity),
        )
        // User routes
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = app.oneshot(empty_request("GET", "/livez")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_articles_empty() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/api/articles"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_article_lifecycle() {
        let app = create_app(AppState::default());

        // Create
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/articles",
                json!({ "title": "Opening night", "content": "Doors at 7" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["viewCount"], json!(0));

        // Record a view
        let response = app
            .clone()
            .oneshot(empty_request("POST", &format!("/api/articles/{}/views", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["viewCount"], json!(1));

        // Update
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/articles/{}", id),
                json!({ "published": true }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["published"], json!(true));
        assert_eq!(updated["viewCount"], json!(1));

        // Delete
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/articles/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Gone
        let response = app
            .oneshot(empty_request("GET", &format!("/api/articles/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_items_are_404() {
        let app = create_app(AppState::default());

        for (method, uri) in [
            ("GET", "/api/articles/nope"),
            ("DELETE", "/api/articles/nope"),
            ("POST", "/api/articles/nope/views"),
            ("GET", "/api/events/nope"),
            ("GET", "/api/events/nope/activities"),
            ("GET", "/api/users/nope"),
        ] {
            let response = app
                .clone()
                .oneshot(empty_request(method, uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn test_invalid_payload_is_400() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/users",
                json!({ "displayName": "Ana", "email": "nope" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_activities_nested_under_event() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/events",
                json!({ "title": "Festival", "startsAt": "2026-07-01T10:00:00Z" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let event_id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/events/{}/activities", event_id),
                json!({ "title": "Opening talk" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let activity = body_json(response).await;
        assert_eq!(activity["eventId"], json!(event_id));

        let response = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/api/events/{}/activities", event_id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([activity]));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/events/missing/activities",
                json!({ "title": "Orphan" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_healthz_reports_cache_stats() {
        let app = create_app(AppState::default());

        // One miss that caches the (empty) list, then one hit
        for _ in 0..2 {
            app.clone()
                .oneshot(empty_request("GET", "/api/events"))
                .await
                .unwrap();
        }

        let response = app.oneshot(empty_request("GET", "/healthz")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "hits": 1, "misses": 1, "entries": 1 }));
    }
}
