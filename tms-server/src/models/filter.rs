//! Lecture filter - an AND-combined list of typed conditions
//!
//! Handlers accumulate conditions first and hand the finished filter to a
//! store. Stores either render it to SQL or evaluate it with [`LectureFilter::matches`].

use std::fmt;

use super::lecture::Lecture;

/// A single constraint on a lecture or its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LectureCondition {
    /// `batches.year`
    BatchYear(i64),
    /// `batches.section`
    BatchSection(String),
    /// `batches.course_id`
    BatchCourse(i64),
    /// `lectures.semester`
    Semester(i64),
    /// `lectures.faculty_id`
    Faculty(i64),
    /// `lectures.room_id`
    Room(i64),
    /// `lectures.batch_id`
    Batch(i64),
}

impl LectureCondition {
    /// Evaluate this condition against an eager-loaded lecture.
    pub fn matches(&self, lecture: &Lecture) -> bool {
        match self {
            Self::BatchYear(year) => lecture.batch.year == *year,
            Self::BatchSection(section) => lecture.batch.section == *section,
            Self::BatchCourse(course_id) => lecture.batch.course_id == *course_id,
            Self::Semester(semester) => lecture.semester == *semester,
            Self::Faculty(faculty_id) => lecture.faculty_id == *faculty_id,
            Self::Room(room_id) => lecture.room_id == *room_id,
            Self::Batch(batch_id) => lecture.batch_id == *batch_id,
        }
    }
}

impl fmt::Display for LectureCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatchYear(v) => write!(f, "batch.year={}", v),
            Self::BatchSection(v) => write!(f, "batch.section={}", v),
            Self::BatchCourse(v) => write!(f, "batch.course_id={}", v),
            Self::Semester(v) => write!(f, "semester={}", v),
            Self::Faculty(v) => write!(f, "faculty_id={}", v),
            Self::Room(v) => write!(f, "room_id={}", v),
            Self::Batch(v) => write!(f, "batch_id={}", v),
        }
    }
}

/// Conditions combined with logical AND. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureFilter {
    conditions: Vec<LectureCondition>,
}

impl LectureFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition, builder style.
    pub fn with(mut self, condition: LectureCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn push(&mut self, condition: LectureCondition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[LectureCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True when every condition holds for `lecture`.
    pub fn matches(&self, lecture: &Lecture) -> bool {
        self.conditions.iter().all(|c| c.matches(lecture))
    }
}

impl fmt::Display for LectureFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("(none)");
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

impl FromIterator<LectureCondition> for LectureFilter {
    fn from_iter<I: IntoIterator<Item = LectureCondition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}
