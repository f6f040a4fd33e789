//! End-to-end tests for the lecture endpoints against a fixture store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tms_server::db::{Dataset, LectureStore, MemoryLectureStore, StoreError};
use tms_server::models::{Batch, Lecture, LectureFilter};
use tms_server::{build_router, AppState, ServerConfig};

const FIXTURE: &str = include_str!("fixtures/timetable.json");

fn dataset() -> Dataset {
    Dataset::from_json(FIXTURE).expect("fixture parses")
}

fn fixture_app() -> (Router, Arc<MemoryLectureStore>) {
    let store = Arc::new(MemoryLectureStore::new(dataset()).expect("fixture is consistent"));
    let app = build_router(AppState::from_shared(store.clone()), &ServerConfig::default());
    (app, store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("response is an array")
        .iter()
        .map(|l| l["ID"].as_i64().unwrap())
        .collect()
}

/// Expected result computed straight from the fixture rows.
fn expected_ids(year: Option<i64>, section: Option<&str>, course_id: Option<i64>) -> Vec<i64> {
    let dataset = dataset();
    let mut ids: Vec<i64> = dataset
        .lectures
        .iter()
        .filter(|l| {
            let batch = dataset.batches.iter().find(|b| b.id == l.batch_id).unwrap();
            year.map_or(true, |y| batch.year == y)
                && section.map_or(true, |s| batch.section == s)
                && course_id.map_or(true, |c| batch.course_id == c)
        })
        .map(|l| l.id)
        .collect();
    ids.sort();
    ids
}

// === FilteredLectures ===

#[tokio::test]
async fn filter_without_params_returns_everything_with_relations() {
    let (app, _) = fixture_app();
    let (status, body) = get(&app, "/lecture/filter").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let first = &body[0];
    assert_eq!(first["Batch"], json!({"ID": 1, "CourseID": 1, "Year": 2023, "Section": "A"}));
    assert_eq!(first["Subject"]["Name"], "Data Structures");
    assert_eq!(first["Faculty"]["Email"], "kulkarni@example.edu");
    assert_eq!(first["Room"]["Capacity"], 120);
    assert_eq!(first["DayOfWeek"], "Monday");
}

#[tokio::test]
async fn filter_matches_fixture_for_every_combination() {
    let (app, _) = fixture_app();

    for year in [None, Some(2023), Some(2024), Some(1999)] {
        for section in [None, Some("A"), Some("B")] {
            for course_id in [None, Some(1), Some(2)] {
                let mut query = Vec::new();
                if let Some(y) = year {
                    query.push(format!("year={}", y));
                }
                if let Some(s) = section {
                    query.push(format!("section={}", s));
                }
                if let Some(c) = course_id {
                    query.push(format!("course_id={}", c));
                }
                let uri = format!("/lecture/filter?{}", query.join("&"));

                let (status, body) = get(&app, &uri).await;
                assert_eq!(status, StatusCode::OK, "{}", uri);
                assert_eq!(ids(&body), expected_ids(year, section, course_id), "{}", uri);
            }
        }
    }
}

#[tokio::test]
async fn filter_rejects_bad_year_without_querying() {
    let (app, store) = fixture_app();
    let (status, body) = get(&app, "/lecture/filter?year=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid year parameter"}));
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn filter_rejects_bad_course_id() {
    let (app, store) = fixture_app();

    let (status, body) = get(&app, "/lecture/filter?course_id=xyz").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid course_id parameter"}));

    let (status, body) = get(&app, "/lecture/filter?year=2023&section=A&course_id=1x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid course_id parameter"}));

    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn filter_ignores_empty_and_unknown_params() {
    let (app, _) = fixture_app();
    let (status, body) = get(&app, "/lecture/filter?year=&section=&semester=zzz&foo=bar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn filter_repeated_key_uses_first_value() {
    let (app, _) = fixture_app();

    let (status, body) = get(&app, "/lecture/filter?year=2023&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected_ids(Some(2023), None, None));

    let (status, body) = get(&app, "/lecture/filter?year=abc&year=2023").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid year parameter"}));
}

// === QueryLectures ===

#[tokio::test]
async fn query_without_params_returns_everything() {
    let (app, _) = fixture_app();

    for uri in ["/lecture/query", "/lecture"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(body[5]["Room"]["Name"], "Lab-3");
    }
}

#[tokio::test]
async fn query_missing_batch_is_404_and_skips_lecture_query() {
    let (app, store) = fixture_app();
    let (status, body) = get(&app, "/lecture/query?course_id=1&year=2099").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Batch not found"}));
    // Only the batch lookup ran
    assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn query_ignores_malformed_semester() {
    let (app, _) = fixture_app();
    let (status, body) = get(&app, "/lecture/query?semester=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (status, body) = get(&app, "/lecture/query?semester=abc&room_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 4, 5]);
}

#[tokio::test]
async fn query_repeated_key_uses_first_value() {
    let (app, _) = fixture_app();

    let (status, body) = get(&app, "/lecture/query?semester=1&semester=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 5]);

    let (status, body) = get(&app, "/lecture/query?semester=x&semester=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (_, body) = get(&app, "/lecture/query?course_id=2&course_id=1&year=2023").await;
    assert_eq!(ids(&body), vec![5, 6]);
}

#[tokio::test]
async fn query_skips_batch_filter_with_only_course() {
    let (app, store) = fixture_app();

    let (status, body) = get(&app, "/lecture/query?course_id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (_, body) = get(&app, "/lecture/query?course_id=1&faculty_id=3").await;
    assert_eq!(ids(&body), vec![4, 6]);

    let (_, body) = get(&app, "/lecture/query?year=2024").await;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (_, body) = get(&app, "/lecture/query?course_id=1&year=twenty").await;
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    // No batch lookups happened
    assert_eq!(store.query_count(), 4);
}

#[tokio::test]
async fn query_resolves_batch_by_course_and_year() {
    let (app, _) = fixture_app();

    // Course 1 / 2023 has sections A (id 1) and B (id 2); the lowest id wins
    let (status, body) = get(&app, "/lecture/query?course_id=1&year=2023").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["BatchID"] == 1));

    let (_, body) = get(&app, "/lecture/query?course_id=2&year=2023&semester=2").await;
    assert_eq!(ids(&body), vec![6]);
}

#[tokio::test]
async fn query_combines_all_filters() {
    let (app, _) = fixture_app();

    let (_, body) = get(&app, "/lecture/query?course_id=1&year=2023&semester=1&room_id=2").await;
    assert_eq!(ids(&body), vec![2]);

    let (_, body) = get(&app, "/lecture/query?semester=1").await;
    assert_eq!(ids(&body), vec![1, 2, 3, 5]);

    let (_, body) = get(&app, "/lecture/query?faculty_id=2&room_id=1").await;
    assert_eq!(ids(&body), vec![5]);

    let (status, body) = get(&app, "/lecture/query?faculty_id=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// === Frontend compatibility ===

#[tokio::test]
async fn lecture_routes_are_served_under_api_prefix() {
    let (app, _) = fixture_app();

    let (status, body) = get(&app, "/api/v1/lecture").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5, 6]);

    let (status, body) = get(&app, "/api/v1/lecture/query?semester=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![6]);

    let (status, body) = get(&app, "/api/v1/lecture/filter?year=x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid year parameter"}));
}

#[tokio::test]
async fn preflight_allows_credentialed_frontend_requests() {
    let (app, _) = fixture_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/lecture/query")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn unknown_origin_gets_no_cors_headers() {
    let (app, _) = fixture_app();
    let request = Request::builder()
        .uri("/api/v1/lecture")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

// === Store failures ===

struct FailingStore {
    find_batch_fails: bool,
}

#[async_trait]
impl LectureStore for FailingStore {
    async fn list_lectures(&self, _filter: &LectureFilter) -> Result<Vec<Lecture>, StoreError> {
        Err(StoreError::Unavailable("relation \"lectures\" does not exist".into()))
    }

    async fn find_batch(&self, course_id: i64, year: i64) -> Result<Option<Batch>, StoreError> {
        if self.find_batch_fails {
            return Err(StoreError::Unavailable("connection reset by peer".into()));
        }
        Ok(Some(Batch {
            id: 1,
            course_id,
            year,
            section: String::new(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("down".into()))
    }
}

fn failing_app(find_batch_fails: bool) -> Router {
    build_router(
        AppState::new(FailingStore { find_batch_fails }),
        &ServerConfig::default(),
    )
}

#[tokio::test]
async fn store_failure_is_500_with_message() {
    let app = failing_app(false);
    let expected = json!({"error": "relation \"lectures\" does not exist"});

    for uri in ["/lecture/filter?year=2023", "/lecture/query", "/lecture/query?course_id=1&year=2023"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body, expected, "{}", uri);
    }
}

#[tokio::test]
async fn batch_lookup_failure_is_500() {
    let app = failing_app(true);
    let (status, body) = get(&app, "/lecture/query?course_id=1&year=2023").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "connection reset by peer"}));
}

// === Health ===

#[tokio::test]
async fn health_and_status() {
    let (app, _) = fixture_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (_, body) = get(&app, "/status").await;
    assert_eq!(body, json!({"database": true}));

    let (_, body) = get(&failing_app(false), "/status").await;
    assert_eq!(body, json!({"database": false}));
}
