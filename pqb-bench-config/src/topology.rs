//! Benchmark topology.
//!
//! Describes which node counts were benchmarked and how many rounds ran for
//! each. The stats extractor walks exactly this grid of log files.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Node counts and rounds of a benchmark run.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct TopologyConfig {
    /// Cluster sizes that were benchmarked, in report order.
    #[serde(default = "default_node_counts")]
    #[validate(custom(function = validation::validate_node_counts))]
    pub node_counts: Vec<usize>,

    /// Rounds executed per cluster size.
    #[serde(default = "default_rounds")]
    #[validate(range(min = 1))]
    pub rounds: u32,
}

fn default_node_counts() -> Vec<usize> {
    vec![3, 5, 10, 15, 20]
}

fn default_rounds() -> u32 {
    5
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            node_counts: default_node_counts(),
            rounds: default_rounds(),
        }
    }
}
