//! ## pqb-bench-manifest::model
//! Typed view of the compose file before rendering.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use pqb_bench_config::ManifestConfig;
use pqb_bench_core::{NodeConfiguration, NodeRef};
use tracing::warn;

use crate::ManifestError;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSpec {
    pub name: String,
    pub subnet: Ipv4Network,
    pub gateway: Ipv4Addr,
}

/// Template every service merges in.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDefaults {
    pub image: String,
    /// CPU cores per container.
    pub cpus: f64,
    /// Memory per container, in MB.
    pub memory_mb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSpec {
    pub node: NodeRef,
    pub command: String,
    pub host_port: u16,
    pub container_port: u16,
    /// Address exactly as listed in the node configuration.
    pub ipv4_address: String,
}

impl ServiceSpec {
    pub fn name(&self) -> String {
        self.node.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentManifest {
    pub version: String,
    pub network: NetworkSpec,
    pub defaults: ServiceDefaults,
    pub services: Vec<ServiceSpec>,
}

impl DeploymentManifest {
    /// One service per configured node, running `algorithm`.
    pub fn build(
        nodes: &NodeConfiguration,
        algorithm: &str,
        config: &ManifestConfig,
    ) -> Result<Self, ManifestError> {
        if nodes.is_empty() {
            return Err(ManifestError::NoNodes);
        }
        let count = nodes.len() as f64;

        let services = nodes
            .iter()
            .map(|(node, address)| {
                check_address(node, address, &config.subnet);
                let port = u32::from(config.base_port) + node.index() as u32;
                let host_port = u16::try_from(port).map_err(|_| ManifestError::PortOutOfRange {
                    index: node.index(),
                    port,
                })?;
                Ok(ServiceSpec {
                    node,
                    command: startup_command(node, algorithm),
                    host_port,
                    container_port: config.container_port,
                    ipv4_address: address.to_string(),
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?;

        Ok(Self {
            version: config.compose_version.clone(),
            network: NetworkSpec {
                name: config.network_name.clone(),
                subnet: config.subnet,
                gateway: config.gateway,
            },
            defaults: ServiceDefaults {
                image: config.image.clone(),
                cpus: config.total_cpus / count,
                memory_mb: config.total_memory_mb / count,
            },
            services,
        })
    }
}

/// Container entrypoint: create accounts, then pipe this node's commands
/// into pqb running under `perf stat`.
fn startup_command(node: NodeRef, algorithm: &str) -> String {
    format!(
        "./acc-generator < tmp/confs/confs.txt && ./commandRunner tmp/commands.txt {node} > tmp/pipe & perf stat ./pqb -s {algorithm} -c tmp/confs/conf{index}.json < tmp/pipe",
        node = node,
        algorithm = algorithm,
        index = node.index(),
    )
}

fn check_address(node: NodeRef, address: &str, subnet: &Ipv4Network) {
    match address.parse::<Ipv4Addr>() {
        Ok(ip) if !subnet.contains(ip) => {
            warn!(%node, address, %subnet, "Node address is outside the manifest subnet")
        }
        Ok(_) => {}
        Err(_) => warn!(%node, address, "Node address is not an IPv4 address"),
    }
}
