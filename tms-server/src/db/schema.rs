//! Schema bootstrap for the timetable tables
//!
//! Production schemas are owned elsewhere; this exists so a fresh database
//! can serve the lecture endpoints. Every statement is idempotent.

use sqlx::PgPool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS batches (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL,
        year BIGINT NOT NULL,
        section TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subjects (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        course_id BIGINT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS faculties (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        capacity BIGINT NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS lectures (
        id BIGSERIAL PRIMARY KEY,
        batch_id BIGINT NOT NULL REFERENCES batches(id),
        subject_id BIGINT NOT NULL REFERENCES subjects(id),
        faculty_id BIGINT NOT NULL REFERENCES faculties(id),
        room_id BIGINT NOT NULL REFERENCES rooms(id),
        semester BIGINT NOT NULL,
        day_of_week TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_batches_course_year ON batches(course_id, year)",
    "CREATE INDEX IF NOT EXISTS idx_lectures_batch ON lectures(batch_id)",
    "CREATE INDEX IF NOT EXISTS idx_lectures_faculty ON lectures(faculty_id)",
    "CREATE INDEX IF NOT EXISTS idx_lectures_room ON lectures(room_id)",
];

/// Create the timetable tables and indexes if they are missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring timetable schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Timetable schema ready");
    Ok(())
}
