//! # pqb-bench Manifest
//!
//! Builds the compose file that starts one pqb container per configured node
//! on a private bridge network. Every container shares a defaults template
//! whose CPU and memory limits split the configured budget evenly.

pub mod error;
pub mod model;
pub mod render;

pub use error::ManifestError;
pub use model::{DeploymentManifest, NetworkSpec, ServiceDefaults, ServiceSpec};
