//! `stockplan-cli`: thin host around the allocation engine.
//!
//! Reads an evaluation request as JSON, runs the engine and returns a report
//! envelope. Spreadsheet parsing and column normalization happen upstream;
//! the request already carries well-typed rows.

pub mod config;
pub mod request;

pub use config::HostConfig;
pub use request::{EvaluationReport, EvaluationRequest, run};
