//! Core deployment logic — types, records, event log, engine.

pub mod engine;
pub mod eventlog;
pub mod state;
pub mod types;
