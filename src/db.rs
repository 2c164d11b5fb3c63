use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Open (or create) the attendance database and ensure the schema exists.
///
/// Schema creation is idempotent so the same call covers first run and
/// every restart.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    debug!("opening database at {}", path.display());
    let conn = Connection::open(path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            roll_number TEXT NOT NULL,
            class_name TEXT NOT NULL
        )",
        [],
    )?;
    // Identity is unique on either key; the insert path checks both, these
    // indexes back the invariant under concurrent writers.
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_students_email ON students(email)",
        [],
    )?;
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_students_roll ON students(roll_number)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_class ON students(class_name)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance(
            id TEXT PRIMARY KEY,
            student_id TEXT NOT NULL,
            status TEXT NOT NULL,
            date TEXT NOT NULL,
            day TEXT NOT NULL,
            class_name TEXT,
            FOREIGN KEY(student_id) REFERENCES students(id)
        )",
        [],
    )?;
    // At most one record per (student, calendar day); the mark path upserts
    // against this key.
    conn.execute(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_student_day
         ON attendance(student_id, day)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance(student_id)",
        [],
    )?;

    Ok(conn)
}
