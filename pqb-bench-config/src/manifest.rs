//! Deployment manifest configuration.
//!
//! Network layout and the resource budget that is split evenly across all
//! node containers.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[validate(schema(function = validation::validate_gateway_in_subnet))]
pub struct ManifestConfig {
    /// Compose file format version.
    #[serde(default = "default_compose_version")]
    #[validate(length(min = 1))]
    pub compose_version: String,

    /// Name of the bridge network all nodes join.
    #[serde(default = "default_network_name")]
    #[validate(length(min = 1))]
    pub network_name: String,

    /// Container image every node runs.
    #[serde(default = "default_image")]
    #[validate(length(min = 1))]
    pub image: String,

    #[serde(default = "default_subnet")]
    pub subnet: Ipv4Network,

    #[serde(default = "default_gateway")]
    pub gateway: Ipv4Addr,

    /// CPU cores shared by all nodes.
    #[serde(default = "default_total_cpus")]
    #[validate(custom(function = validation::validate_budget))]
    pub total_cpus: f64,

    /// Memory (MB) shared by all nodes.
    #[serde(default = "default_total_memory")]
    #[validate(custom(function = validation::validate_budget))]
    pub total_memory_mb: f64,

    /// Host port of node 1 is `base_port + 1`.
    #[serde(default = "default_base_port")]
    pub base_port: u16,

    /// Port the pqb process listens on inside its container.
    #[serde(default = "default_container_port")]
    #[validate(range(min = 1))]
    pub container_port: u16,
}

fn default_compose_version() -> String {
    "3.9".into()
}

fn default_network_name() -> String {
    "pqb_net".into()
}

fn default_image() -> String {
    "pqb_image".into()
}

fn default_subnet() -> Ipv4Network {
    Ipv4Network::new(Ipv4Addr::new(10, 5, 0, 0), 24).expect("/24 is a valid IPv4 prefix")
}

fn default_gateway() -> Ipv4Addr {
    Ipv4Addr::new(10, 5, 0, 1)
}

fn default_total_cpus() -> f64 {
    8.0
}

fn default_total_memory() -> f64 {
    8000.0
}

fn default_base_port() -> u16 {
    45000
}

fn default_container_port() -> u16 {
    3330
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            compose_version: default_compose_version(),
            network_name: default_network_name(),
            image: default_image(),
            subnet: default_subnet(),
            gateway: default_gateway(),
            total_cpus: default_total_cpus(),
            total_memory_mb: default_total_memory(),
            base_port: default_base_port(),
            container_port: default_container_port(),
        }
    }
}
