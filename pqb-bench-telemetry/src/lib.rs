//! # pqb-bench Telemetry
//!
//! Logging setup shared by the benchmark tools.

pub mod logging;

pub use logging::EventLogger;
