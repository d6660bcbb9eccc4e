//! # pqb-bench-core
//!
//! Types shared by the pqb benchmark tools.
//!
//! ### Key Submodules:
//! - `node`: `node<N>` references with 1-based indices
//! - `node_config`: the node address list produced by the configuration generator
//! - `error`: parse errors for the above

pub mod error;
pub mod node;
pub mod node_config;

pub use error::NodeConfigError;
pub use node::NodeRef;
pub use node_config::{NodeConfiguration, NodeListLayout};
