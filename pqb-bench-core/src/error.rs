use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeConfigError {
    #[error("Node configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Line {line}: expected a token at position {position}, found {found} token(s)")]
    MissingToken {
        line: usize,
        position: usize,
        found: usize,
    },

    #[error("Invalid node reference '{0}': expected node<N> with N >= 1")]
    InvalidNodeRef(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
