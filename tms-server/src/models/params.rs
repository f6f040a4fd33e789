//! Query-string parameters for the lecture endpoints
//!
//! Every parameter arrives as an optional string. Absent and empty values are
//! treated the same: the filter is not applied. How a malformed integer is
//! handled is decided per endpoint by [`ParsePolicy`]. A key given more than
//! once keeps its first value.

use std::collections::HashMap;

use super::filter::{LectureCondition, LectureFilter};
use super::validation::ValidationError;

/// What to do with an integer parameter that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Fail the request with a 400.
    Reject,
    /// Drop the filter and carry on.
    Ignore,
}

/// Parse an optional integer parameter under `policy`.
///
/// Returns `Ok(None)` when the value is absent, empty, or malformed under
/// [`ParsePolicy::Ignore`].
pub fn parse_int(
    field: &'static str,
    raw: Option<&str>,
    policy: ParsePolicy,
) -> Result<Option<i64>, ValidationError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => match policy {
            ParsePolicy::Reject => Err(ValidationError::InvalidInteger { field }),
            ParsePolicy::Ignore => {
                tracing::debug!(field, value = raw, "ignoring malformed integer parameter");
                Ok(None)
            }
        },
    }
}

/// Decoded query-string pairs, first occurrence of each key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(HashMap<String, String>);

impl QueryPairs {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

impl FromIterator<(String, String)> for QueryPairs {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        for (key, value) in iter {
            map.entry(key).or_insert(value);
        }
        Self(map)
    }
}

/// Parameters of `GET /lecture/filter`
#[derive(Debug, Clone, Default)]
pub struct FilteredLectureParams {
    pub year: Option<String>,
    pub section: Option<String>,
    pub course_id: Option<String>,
}

impl From<QueryPairs> for FilteredLectureParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            year: pairs.owned("year"),
            section: pairs.owned("section"),
            course_id: pairs.owned("course_id"),
        }
    }
}

impl FilteredLectureParams {
    pub const POLICY: ParsePolicy = ParsePolicy::Reject;

    /// Build the batch-scoped filter. `year` is validated before `course_id`.
    pub fn into_filter(self) -> Result<LectureFilter, ValidationError> {
        let mut filter = LectureFilter::new();

        if let Some(year) = parse_int("year", self.year.as_deref(), Self::POLICY)? {
            filter.push(LectureCondition::BatchYear(year));
        }

        if let Some(section) = self.section.filter(|s| !s.is_empty()) {
            filter.push(LectureCondition::BatchSection(section));
        }

        if let Some(course_id) = parse_int("course_id", self.course_id.as_deref(), Self::POLICY)? {
            filter.push(LectureCondition::BatchCourse(course_id));
        }

        Ok(filter)
    }
}

/// Parameters of `GET /lecture/query`
#[derive(Debug, Clone, Default)]
pub struct LectureQueryParams {
    pub course_id: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub faculty_id: Option<String>,
    pub room_id: Option<String>,
}

/// Course and year identifying the batch to restrict lectures to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchKey {
    pub course_id: i64,
    pub year: i64,
}

/// Parsed form of [`LectureQueryParams`]: direct lecture conditions plus an
/// optional batch that must be resolved before the lecture query runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureQuery {
    pub filter: LectureFilter,
    pub batch: Option<BatchKey>,
}

impl From<QueryPairs> for LectureQueryParams {
    fn from(pairs: QueryPairs) -> Self {
        Self {
            course_id: pairs.owned("course_id"),
            year: pairs.owned("year"),
            semester: pairs.owned("semester"),
            faculty_id: pairs.owned("faculty_id"),
            room_id: pairs.owned("room_id"),
        }
    }
}

impl LectureQueryParams {
    pub const POLICY: ParsePolicy = ParsePolicy::Ignore;

    pub fn into_query(self) -> LectureQuery {
        let mut filter = LectureFilter::new();

        // Ignore never yields Err, so flattening the Result is lossless.
        let int = |field: &'static str, raw: &Option<String>| {
            parse_int(field, raw.as_deref(), Self::POLICY).ok().flatten()
        };

        if let Some(semester) = int("semester", &self.semester) {
            filter.push(LectureCondition::Semester(semester));
        }
        if let Some(faculty_id) = int("faculty_id", &self.faculty_id) {
            filter.push(LectureCondition::Faculty(faculty_id));
        }
        if let Some(room_id) = int("room_id", &self.room_id) {
            filter.push(LectureCondition::Room(room_id));
        }

        let batch = match (int("course_id", &self.course_id), int("year", &self.year)) {
            (Some(course_id), Some(year)) => Some(BatchKey { course_id, year }),
            _ => None,
        };

        LectureQuery { filter, batch }
    }
}
