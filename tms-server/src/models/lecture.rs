//! Lecture and its related records
//!
//! Field names serialize as PascalCase with `ID` suffixes, which is the shape
//! the timetable frontend reads (`lecture.BatchID`, `batch.Year`, ...).

use serde::{Deserialize, Serialize};

/// A cohort of students identified by course and admission year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Batch {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CourseID")]
    pub course_id: i64,
    pub year: i64,
    #[serde(default)]
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subject {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "CourseID")]
    pub course_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Faculty {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Room {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
}

/// A scheduled class session with its batch, subject, faculty and room
/// loaded alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lecture {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "BatchID")]
    pub batch_id: i64,
    #[serde(rename = "SubjectID")]
    pub subject_id: i64,
    #[serde(rename = "FacultyID")]
    pub faculty_id: i64,
    #[serde(rename = "RoomID")]
    pub room_id: i64,
    pub semester: i64,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub batch: Batch,
    pub subject: Subject,
    pub faculty: Faculty,
    pub room: Room,
}
