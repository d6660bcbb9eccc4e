//! # pqb-bench Stats
//!
//! Turns the raw output of a benchmark campaign into one report per cluster
//! size. Two families of files are read from the results directory:
//! - `stats-<alg>-<n>.txt`: container statistics sampled once per node and
//!   round, providing memory usage
//! - `<alg>-<n>-<round>.txt`: pqb output of one round, providing CPU cycles
//!   (from `perf stat`) and transmitted bytes
//!
//! and `<alg>-<n>.out` receives one block per round.

pub mod error;
pub mod extractor;
pub mod patterns;
pub mod report;
pub mod table;

pub use error::{Metric, StatsError};
pub use extractor::{ExtractionSummary, StatExtractor};
pub use report::{ReportBlock, ReportFile, ReportRow};
pub use table::StatsTable;
