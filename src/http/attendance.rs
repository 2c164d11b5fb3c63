use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::directory::{self, Student};
use crate::error::{Error, Result};
use crate::ledger::{self, AttendanceEntry, StudentSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    #[serde(default, rename = "attendanceData")]
    pub attendance_data: Vec<AttendanceEntry>,
}

pub async fn mark(
    State(state): State<Arc<AppState>>,
    Path(class): Path<String>,
    Json(body): Json<MarkRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let conn = state.db()?;
    let report = ledger::mark_attendance(&conn, &class, &body.attendance_data)?;
    let mut response = serde_json::to_value(&report)?;
    if let Some(map) = response.as_object_mut() {
        map.insert(
            "message".to_string(),
            json!("attendance marked successfully"),
        );
    }
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
    Path(class): Path<String>,
) -> Result<Json<Vec<StudentSummary>>> {
    let conn = state.db()?;
    Ok(Json(ledger::class_summary(&conn, &class)?))
}

/// Roster of one class; the mark-attendance page loads its student list
/// from here.
pub async fn class_roster(
    State(state): State<Arc<AppState>>,
    Path(class): Path<String>,
) -> Result<Json<Vec<Student>>> {
    let conn = state.db()?;
    let students = directory::students_in_class(&conn, &class)?;
    if students.is_empty() {
        return Err(Error::NotFound(format!(
            "no students found in class {class}"
        )));
    }
    Ok(Json(students))
}
