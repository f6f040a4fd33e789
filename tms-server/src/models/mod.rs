//! Domain models for lecture queries
//!
//! Request parameters are parsed into typed filter conditions here.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod lecture;
pub mod filter;
pub mod params;

pub use validation::ValidationError;
pub use lecture::{Batch, Faculty, Lecture, Room, Subject};
pub use filter::{LectureCondition, LectureFilter};
pub use params::{
    BatchKey, FilteredLectureParams, LectureQuery, LectureQueryParams, ParsePolicy, QueryPairs,
};
