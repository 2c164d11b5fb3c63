use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rollcalld::config::Config;
use rollcalld::state::AppState;
use rollcalld::{db, http};

fn temp_db(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{}-{}.sqlite3",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ))
}

fn test_app(prefix: &str) -> axum::Router {
    let path = temp_db(prefix);
    let conn = db::open_db(&path).expect("open db");
    let config = Config {
        database_path: path.to_string_lossy().into_owned(),
        port: 0,
        auth_gateway_url: None,
    };
    http::router(AppState::new(config, conn, None))
}

async fn request(
    app: &axum::Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn add_student(app: &axum::Router, name: &str, email: &str, roll: &str, class: &str) {
    let (status, body) = request(
        app,
        "POST",
        "/students",
        Some(json!({ "name": name, "email": email, "rollNumber": roll, "class": class })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add {name}: {body}");
}

#[tokio::test]
async fn distinct_classes_are_deduplicated_and_sorted() {
    let app = test_app("rollcall-classes");
    add_student(&app, "Alice", "alice@example.com", "1", "10B").await;
    add_student(&app, "Bob", "bob@example.com", "2", "10A").await;
    add_student(&app, "Charlie", "charlie@example.com", "3", "10A").await;

    let (status, body) = request(&app, "GET", "/students/classes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["10A", "10B"]));
}

#[tokio::test]
async fn no_classes_is_not_found() {
    let app = test_app("rollcall-no-classes");
    let (status, body) = request(&app, "GET", "/students/classes", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn class_roster_route_returns_only_that_class() {
    let app = test_app("rollcall-roster");
    add_student(&app, "Alice", "alice@example.com", "1", "10A").await;
    add_student(&app, "Bob", "bob@example.com", "2", "10B").await;

    let (status, body) = request(&app, "GET", "/students/attendance/10A", None).await;
    assert_eq!(status, StatusCode::OK);
    let roster = body.as_array().expect("array");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["name"], "Alice");

    let (status, _) = request(&app, "GET", "/students/attendance/11C", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
