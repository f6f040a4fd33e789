//! Database layer - lecture store trait, connection pool and implementations
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Lectures are loaded with their relations in one JOIN query - no N+1 queries
//! - Filters are bound parameters, never interpolated SQL
//! - Read-only: nothing here mutates lecture data outside schema bootstrap

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::{Dataset, LectureRecord, MemoryLectureStore};
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgLectureStore;
pub use store::{LectureStore, StoreError};
