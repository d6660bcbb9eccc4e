use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Figure scraped from a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    CpuCycles,
    BytesTransmitted,
    MemoryAllocated,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::CpuCycles => "CPU cycle",
            Metric::BytesTransmitted => "transmitted bytes",
            Metric::MemoryAllocated => "memory allocation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: expected at least {needed} {metric} samples, found {found}", path.display())]
    MissingSamples {
        path: PathBuf,
        metric: Metric,
        needed: usize,
        found: usize,
    },
}
