//! Postgres lecture store
//!
//! Lectures are read with a single query that joins batches, subjects,
//! faculties and rooms, so every row arrives with its relations populated.
//! The batch join is always present because the batch filters reference it.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::store::{LectureStore, StoreError};
use crate::models::{Batch, Faculty, Lecture, LectureCondition, LectureFilter, Room, Subject};

const SELECT_LECTURES: &str = r#"
SELECT
    l.id, l.batch_id, l.subject_id, l.faculty_id, l.room_id,
    l.semester, l.day_of_week, l.start_time, l.end_time,
    b.course_id AS batch_course_id, b.year AS batch_year, b.section AS batch_section,
    s.name AS subject_name, s.code AS subject_code, s.course_id AS subject_course_id,
    f.name AS faculty_name, f.email AS faculty_email,
    r.name AS room_name, r.capacity AS room_capacity
FROM lectures l
JOIN batches b ON b.id = l.batch_id
JOIN subjects s ON s.id = l.subject_id
JOIN faculties f ON f.id = l.faculty_id
JOIN rooms r ON r.id = l.room_id"#;

/// Flat join row, folded into [`Lecture`]
#[derive(Debug, FromRow)]
struct LectureRow {
    id: i64,
    batch_id: i64,
    subject_id: i64,
    faculty_id: i64,
    room_id: i64,
    semester: i64,
    day_of_week: String,
    start_time: String,
    end_time: String,
    batch_course_id: i64,
    batch_year: i64,
    batch_section: String,
    subject_name: String,
    subject_code: String,
    subject_course_id: i64,
    faculty_name: String,
    faculty_email: String,
    room_name: String,
    room_capacity: i64,
}

impl From<LectureRow> for Lecture {
    fn from(r: LectureRow) -> Self {
        Self {
            id: r.id,
            batch_id: r.batch_id,
            subject_id: r.subject_id,
            faculty_id: r.faculty_id,
            room_id: r.room_id,
            semester: r.semester,
            day_of_week: r.day_of_week,
            start_time: r.start_time,
            end_time: r.end_time,
            batch: Batch {
                id: r.batch_id,
                course_id: r.batch_course_id,
                year: r.batch_year,
                section: r.batch_section,
            },
            subject: Subject {
                id: r.subject_id,
                name: r.subject_name,
                code: r.subject_code,
                course_id: r.subject_course_id,
            },
            faculty: Faculty {
                id: r.faculty_id,
                name: r.faculty_name,
                email: r.faculty_email,
            },
            room: Room {
                id: r.room_id,
                name: r.room_name,
                capacity: r.room_capacity,
            },
        }
    }
}

/// Append `condition` as a bound predicate.
fn push_condition(builder: &mut QueryBuilder<'static, Postgres>, condition: &LectureCondition) {
    match condition {
        LectureCondition::BatchYear(year) => builder.push("b.year = ").push_bind(*year),
        LectureCondition::BatchSection(section) => {
            builder.push("b.section = ").push_bind(section.clone())
        }
        LectureCondition::BatchCourse(course_id) => {
            builder.push("b.course_id = ").push_bind(*course_id)
        }
        LectureCondition::Semester(semester) => builder.push("l.semester = ").push_bind(*semester),
        LectureCondition::Faculty(faculty_id) => {
            builder.push("l.faculty_id = ").push_bind(*faculty_id)
        }
        LectureCondition::Room(room_id) => builder.push("l.room_id = ").push_bind(*room_id),
        LectureCondition::Batch(batch_id) => builder.push("l.batch_id = ").push_bind(*batch_id),
    };
}

/// Build the eager-loading lecture query for `filter`.
pub(crate) fn lecture_query(filter: &LectureFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_LECTURES);

    for (i, condition) in filter.conditions().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        push_condition(&mut builder, condition);
    }

    builder.push(" ORDER BY l.id");
    builder
}

/// Lecture store backed by a Postgres pool
#[derive(Clone)]
pub struct PgLectureStore {
    pool: PgPool,
}

impl PgLectureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LectureStore for PgLectureStore {
    async fn list_lectures(&self, filter: &LectureFilter) -> Result<Vec<Lecture>, StoreError> {
        let mut builder = lecture_query(filter);
        let rows: Vec<LectureRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Lecture::from).collect())
    }

    async fn find_batch(&self, course_id: i64, year: i64) -> Result<Option<Batch>, StoreError> {
        let row: Option<(i64, i64, i64, String)> = sqlx::query_as(
            r#"
            SELECT id, course_id, year, section
            FROM batches
            WHERE course_id = $1 AND year = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(course_id)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, course_id, year, section)| Batch {
            id,
            course_id,
            year,
            section,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
