//! HTTP surface: route table, CORS, and the static page.

mod attendance;
mod auth;
mod students;

use std::sync::Arc;

use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    // The original deployment served the frontend from a separate dev
    // origin, so CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/students", post(students::add).get(students::list))
        .route("/students/classes", get(students::classes))
        .route(
            "/students/attendance/summary/{class}",
            get(attendance::summary),
        )
        .route(
            "/students/attendance/{class}",
            post(attendance::mark).get(attendance::class_roster),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .layer(cors)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn health() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
