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

async fn add_student(app: &axum::Router, name: &str, email: &str, roll: &str, class: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/students",
        Some(json!({ "name": name, "email": email, "rollNumber": roll, "class": class })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "add {name}: {body}");
    body["student"]["id"].as_str().expect("student id").to_string()
}

#[tokio::test]
async fn second_submission_same_day_overwrites_instead_of_duplicating() {
    let app = test_app("rollcall-upsert");
    let alice = add_student(&app, "Alice", "alice@example.com", "1", "10A").await;

    let (status, body) = request(
        &app,
        "POST",
        "/students/attendance/10A",
        Some(json!({ "attendanceData": [{ "studentId": alice, "status": "present" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["written"], 1);
    assert_eq!(body["updated"], 0);

    // Same calendar day, new status: overwrite, not a second record.
    let (status, body) = request(
        &app,
        "POST",
        "/students/attendance/10A",
        Some(json!({ "attendanceData": [{ "studentId": alice, "status": "absent" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["written"], 0);
    assert_eq!(body["updated"], 1);

    let (status, body) = request(&app, "GET", "/students/attendance/summary/10A", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body[0]["records"].as_array().expect("records");
    assert_eq!(records.len(), 1, "exactly one record for the day: {body}");
    assert_eq!(records[0]["status"], "absent", "last write wins");
    assert_eq!(body[0]["attendancePercentage"], 0.0);
}
