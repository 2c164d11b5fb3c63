use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::directory::{self, NewStudent, Student};
use crate::error::Result;
use crate::state::AppState;

pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewStudent>,
) -> Result<(StatusCode, Json<Value>)> {
    let conn = state.db()?;
    let student = directory::add_student(&conn, &body)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "student added successfully",
            "student": student,
        })),
    ))
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Student>>> {
    let conn = state.db()?;
    Ok(Json(directory::list_students(&conn)?))
}

pub async fn classes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>> {
    let conn = state.db()?;
    Ok(Json(directory::list_distinct_classes(&conn)?))
}
