//! tms-server: HTTP server for timetable lecture queries
//!
//! Serves filtered reads over lectures joined with their batch, subject,
//! faculty and room. The store is injected through [`AppState`], so the
//! routes run against Postgres or an in-memory fixture alike.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod state;

pub use config::{ConfigError, TmsConfig};
pub use error::ApiError;
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
