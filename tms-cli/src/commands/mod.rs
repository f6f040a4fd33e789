//! Command implementations for tms CLI

pub mod serve;

pub use serve::run_serve;
