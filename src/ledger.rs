//! Attendance ledger and aggregator.
//!
//! One record per (student, calendar day), day boundary at local midnight.
//! Writes are day-scoped upserts: resubmitting for the same day overwrites
//! the status instead of adding a second record. Status strings are
//! normalized to lowercase at this boundary; the read path never
//! re-normalizes.

use std::collections::HashMap;
use std::collections::HashSet;

use chrono::{Local, SecondsFormat};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::directory;
use crate::error::{Error, Result};

/// Canonical attendance status. Serialized lowercase everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Present,
    Absent,
}

impl Status {
    /// Case-insensitive parse; anything but present/absent is malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AttendanceEntry {
    #[serde(default, rename = "studentId")]
    pub student_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AttendanceRecord {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub status: Status,
    pub date: String,
}

/// Outcome of a batch submission. Skipped and failed entries are reported
/// explicitly; a batch is never summarized as a plain success.
#[derive(Debug, Serialize)]
pub struct MarkReport {
    pub written: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(rename = "skippedStudentIds")]
    pub skipped_student_ids: Vec<String>,
    #[serde(rename = "attendanceRecords")]
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Serialize)]
pub struct RecordView {
    pub date: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StudentSummary {
    pub name: String,
    #[serde(rename = "rollNumber")]
    pub roll_number: String,
    #[serde(rename = "attendancePercentage")]
    pub attendance_percentage: f64,
    pub records: Vec<RecordView>,
}

/// Mark attendance for a class.
///
/// Entries for students outside the class are skipped (and reported),
/// valid entries are upserted one at a time so a storage failure on one
/// student does not lose the rest of the batch.
pub fn mark_attendance(
    conn: &Connection,
    class_name: &str,
    entries: &[AttendanceEntry],
) -> Result<MarkReport> {
    if entries.is_empty() {
        return Err(Error::validation("invalid or empty attendance data"));
    }
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(status) = Status::parse(&entry.status) else {
            return Err(Error::Validation(format!(
                "invalid status {:?} for student {:?}",
                entry.status, entry.student_id
            )));
        };
        parsed.push((entry.student_id.trim().to_string(), status));
    }

    let students = directory::students_in_class(conn, class_name)?;
    if students.is_empty() {
        return Err(Error::NotFound(format!(
            "no students found in class {class_name}"
        )));
    }
    let valid_ids: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();

    let now = Local::now();
    let day = now.format("%Y-%m-%d").to_string();
    let date = now.to_rfc3339_opts(SecondsFormat::Secs, false);

    let mut report = MarkReport {
        written: 0,
        updated: 0,
        skipped: 0,
        failed: 0,
        skipped_student_ids: Vec::new(),
        records: Vec::new(),
    };
    for (student_id, status) in parsed {
        if !valid_ids.contains(student_id.as_str()) {
            warn!(%student_id, class_name, "skipping entry for student not in class");
            report.skipped += 1;
            report.skipped_student_ids.push(student_id);
            continue;
        }
        match upsert_day_record(conn, class_name, &student_id, status, &date, &day) {
            Ok(was_update) => {
                if was_update {
                    report.updated += 1;
                } else {
                    report.written += 1;
                }
                report.records.push(AttendanceRecord {
                    student_id,
                    status,
                    date: date.clone(),
                });
            }
            Err(e) => {
                error!(%student_id, "failed to save attendance: {e}");
                report.failed += 1;
            }
        }
    }

    if report.records.is_empty() {
        return Err(Error::internal("failed to mark attendance for any student"));
    }
    Ok(report)
}

/// Returns true when an existing same-day record was overwritten.
fn upsert_day_record(
    conn: &Connection,
    class_name: &str,
    student_id: &str,
    status: Status,
    date: &str,
    day: &str,
) -> rusqlite::Result<bool> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT id FROM attendance WHERE student_id = ? AND day = ?",
            (student_id, day),
            |r| r.get(0),
        )
        .optional()?;
    match existing {
        Some(id) => {
            conn.execute(
                "UPDATE attendance SET status = ?, date = ? WHERE id = ?",
                (status.as_str(), date, &id),
            )?;
            Ok(true)
        }
        None => {
            conn.execute(
                "INSERT INTO attendance(id, student_id, status, date, day, class_name)
                 VALUES(?, ?, ?, ?, ?, ?)",
                (
                    Uuid::new_v4().to_string(),
                    student_id,
                    status.as_str(),
                    date,
                    day,
                    class_name,
                ),
            )?;
            Ok(false)
        }
    }
}

/// Per-student attendance percentages and history for one class.
///
/// Records for the whole roster are fetched in a single batched query,
/// not one query per student.
pub fn class_summary(conn: &Connection, class_name: &str) -> Result<Vec<StudentSummary>> {
    let students = directory::students_in_class(conn, class_name)?;
    if students.is_empty() {
        return Err(Error::NotFound(format!(
            "no students found in class {class_name}"
        )));
    }

    let placeholders = vec!["?"; students.len()].join(", ");
    let sql = format!(
        "SELECT student_id, date, status FROM attendance
         WHERE student_id IN ({placeholders})
         ORDER BY date"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(students.iter().map(|s| s.id.as_str())),
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    RecordView {
                        date: r.get(1)?,
                        status: r.get(2)?,
                    },
                ))
            },
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut by_student: HashMap<String, Vec<RecordView>> = HashMap::new();
    for (student_id, record) in rows {
        by_student.entry(student_id).or_default().push(record);
    }

    Ok(students
        .into_iter()
        .map(|student| {
            let records = by_student.remove(&student.id).unwrap_or_default();
            let total = records.len();
            let present = records
                .iter()
                .filter(|r| r.status == Status::Present.as_str())
                .count();
            let attendance_percentage = if total > 0 {
                round2(present as f64 / total as f64 * 100.0)
            } else {
                0.0
            };
            StudentSummary {
                name: student.name,
                roll_number: student.roll_number,
                attendance_percentage,
                records,
            }
        })
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
