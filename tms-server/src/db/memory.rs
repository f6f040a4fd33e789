//! In-memory lecture store
//!
//! Holds a fixture [`Dataset`] and answers the same queries as the Postgres
//! store. Used by the API tests and by `tms serve --fixture` to run without a
//! database.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;

use super::store::{LectureStore, StoreError};
use crate::models::{Batch, Faculty, Lecture, LectureFilter, Room, Subject};

/// Lecture row as stored, foreign keys only
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LectureRecord {
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
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

/// All tables a lecture query touches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dataset {
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub faculties: Vec<Faculty>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub lectures: Vec<LectureRecord>,
}

impl Dataset {
    /// Parse a dataset from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON dataset file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&content)
    }
}

/// Fixture-backed [`LectureStore`].
///
/// Lectures are resolved against their relations once, at construction; a
/// dangling foreign key is rejected there.
pub struct MemoryLectureStore {
    batches: Vec<Batch>,
    lectures: Vec<Lecture>,
    queries: AtomicUsize,
}

impl MemoryLectureStore {
    pub fn new(dataset: Dataset) -> Result<Self, StoreError> {
        let batches: HashMap<i64, &Batch> = dataset.batches.iter().map(|b| (b.id, b)).collect();
        let subjects: HashMap<i64, &Subject> =
            dataset.subjects.iter().map(|s| (s.id, s)).collect();
        let faculties: HashMap<i64, &Faculty> =
            dataset.faculties.iter().map(|f| (f.id, f)).collect();
        let rooms: HashMap<i64, &Room> = dataset.rooms.iter().map(|r| (r.id, r)).collect();

        let mut lectures = dataset
            .lectures
            .iter()
            .map(|record| -> Result<Lecture, StoreError> {
                let dangling = |relation: &'static str, relation_id: i64| StoreError::DanglingReference {
                    table: "lecture",
                    id: record.id,
                    relation,
                    relation_id,
                };

                Ok(Lecture {
                    id: record.id,
                    batch_id: record.batch_id,
                    subject_id: record.subject_id,
                    faculty_id: record.faculty_id,
                    room_id: record.room_id,
                    semester: record.semester,
                    day_of_week: record.day_of_week.clone(),
                    start_time: record.start_time.clone(),
                    end_time: record.end_time.clone(),
                    batch: batches
                        .get(&record.batch_id)
                        .map(|b| (*b).clone())
                        .ok_or_else(|| dangling("batch", record.batch_id))?,
                    subject: subjects
                        .get(&record.subject_id)
                        .map(|s| (*s).clone())
                        .ok_or_else(|| dangling("subject", record.subject_id))?,
                    faculty: faculties
                        .get(&record.faculty_id)
                        .map(|f| (*f).clone())
                        .ok_or_else(|| dangling("faculty", record.faculty_id))?,
                    room: rooms
                        .get(&record.room_id)
                        .map(|r| (*r).clone())
                        .ok_or_else(|| dangling("room", record.room_id))?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        lectures.sort_by_key(|l| l.id);

        let mut batches = dataset.batches;
        batches.sort_by_key(|b| b.id);

        Ok(Self {
            batches,
            lectures,
            queries: AtomicUsize::new(0),
        })
    }

    /// Load a JSON dataset file and build a store from it.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::new(Dataset::load(path).await?)
    }

    /// Number of lecture and batch queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn lecture_count(&self) -> usize {
        self.lectures.len()
    }
}

#[async_trait]
impl LectureStore for MemoryLectureStore {
    async fn list_lectures(&self, filter: &LectureFilter) -> Result<Vec<Lecture>, StoreError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .lectures
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect())
    }

    async fn find_batch(&self, course_id: i64, year: i64) -> Result<Option<Batch>, StoreError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .batches
            .iter()
            .find(|b| b.course_id == course_id && b.year == year)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
