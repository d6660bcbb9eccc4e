use std::path::PathBuf;

use pqb_bench_core::NodeConfigError;
use thiserror::Error;

/// Errors raised while reading, parsing or replaying a command script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Command script not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Line {line}: missing {what}")]
    MissingToken { line: usize, what: &'static str },

    #[error("Line {line}: {source}")]
    InvalidNode {
        line: usize,
        #[source]
        source: NodeConfigError,
    },

    #[error("Line {line}: invalid sleep duration '{value}'")]
    InvalidDuration { line: usize, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
