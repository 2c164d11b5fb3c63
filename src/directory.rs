//! Student directory: roster identity and class assignment.
//!
//! Students are created once and never edited or deleted here; uniqueness
//! is enforced on roll number or email before the insert.

use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "rollNumber")]
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

/// Incoming add-student payload. Fields default to empty so a missing
/// field reads the same as a blank one and both fail validation.
#[derive(Debug, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "rollNumber")]
    pub roll_number: String,
    #[serde(default, rename = "class")]
    pub class_name: String,
}

pub fn add_student(conn: &Connection, new: &NewStudent) -> Result<Student> {
    let name = new.name.trim();
    let email = new.email.trim();
    let roll_number = new.roll_number.trim();
    let class_name = new.class_name.trim();

    let mut missing = Vec::new();
    if name.is_empty() {
        missing.push("name");
    }
    if email.is_empty() {
        missing.push("email");
    }
    if roll_number.is_empty() {
        missing.push("rollNumber");
    }
    if class_name.is_empty() {
        missing.push("class");
    }
    if !missing.is_empty() {
        return Err(Error::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let existing = conn
        .query_row(
            "SELECT 1 FROM students WHERE roll_number = ? OR email = ?",
            (roll_number, email),
            |r| r.get::<_, i64>(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(Error::conflict(
            "student with this roll number or email already exists",
        ));
    }

    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        roll_number: roll_number.to_string(),
        class_name: class_name.to_string(),
    };
    conn.execute(
        "INSERT INTO students(id, name, email, roll_number, class_name)
         VALUES(?, ?, ?, ?, ?)",
        (
            &student.id,
            &student.name,
            &student.email,
            &student.roll_number,
            &student.class_name,
        ),
    )?;
    Ok(student)
}

/// All students, ordered by name ascending. An empty roster is reported
/// as not-found, matching the API contract.
pub fn list_students(conn: &Connection) -> Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, roll_number, class_name
         FROM students
         ORDER BY name",
    )?;
    let students = stmt
        .query_map([], row_to_student)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if students.is_empty() {
        return Err(Error::not_found("no students found"));
    }
    Ok(students)
}

pub fn list_distinct_classes(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT class_name FROM students ORDER BY class_name")?;
    let classes = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if classes.is_empty() {
        return Err(Error::not_found("no classes found"));
    }
    Ok(classes)
}

/// Roster of one class, ordered by name. Empty means the class label is
/// unknown; callers decide whether that is a not-found.
pub fn students_in_class(conn: &Connection, class_name: &str) -> Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, roll_number, class_name
         FROM students
         WHERE class_name = ?
         ORDER BY name",
    )?;
    let students = stmt
        .query_map([class_name], row_to_student)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(students)
}

fn row_to_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        roll_number: row.get(3)?,
        class_name: row.get(4)?,
    })
}
