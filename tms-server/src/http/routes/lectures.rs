//! Lecture query endpoints
//!
//! Both handlers parse their parameters into a [`LectureFilter`](crate::models::LectureFilter),
//! run it against the store, and return the eager-loaded lectures.

use axum::{extract::State, routing::get, Json, Router};

use crate::error::ApiError;
use crate::http::extractors::FirstValueQuery;
use crate::models::{FilteredLectureParams, Lecture, LectureCondition, LectureQueryParams};
use crate::state::AppState;

/// GET /lecture/filter - lectures by batch year, section and course.
///
/// Malformed `year` or `course_id` is a 400 and no query runs.
pub async fn filtered_lectures(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<FilteredLectureParams>,
) -> Result<Json<Vec<Lecture>>, ApiError> {
    let filter = params.into_filter()?;
    tracing::debug!(%filter, "filtered lecture query");

    let lectures = state.store().list_lectures(&filter).await?;
    Ok(Json(lectures))
}

/// GET /lecture/query - lectures by semester, faculty, room and batch.
///
/// Malformed integers are skipped. The batch is resolved from `course_id` and
/// `year` only when both are given and both parse; a miss is a 404.
pub async fn query_lectures(
    State(state): State<AppState>,
    FirstValueQuery(params): FirstValueQuery<LectureQueryParams>,
) -> Result<Json<Vec<Lecture>>, ApiError> {
    let query = params.into_query();
    let mut filter = query.filter;

    if let Some(key) = query.batch {
        let batch = state
            .store()
            .find_batch(key.course_id, key.year)
            .await?
            .ok_or(ApiError::NotFound { resource: "Batch" })?;

        filter.push(LectureCondition::Batch(batch.id));
    }

    tracing::debug!(%filter, "lecture query");
    let lectures = state.store().list_lectures(&filter).await?;
    Ok(Json(lectures))
}

/// Lecture routes. `build_router` also nests them under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lecture", get(query_lectures))
        .route("/lecture/query", get(query_lectures))
        .route("/lecture/filter", get(filtered_lectures))
}
