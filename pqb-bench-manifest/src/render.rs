//! ## pqb-bench-manifest::render
//! **Compose YAML writer**
//!
//! Written by hand rather than through a serializer: the defaults template
//! relies on a YAML anchor (`&pqb_base`) and merge keys (`<<: *pqb_base`),
//! and the layout is expected to stay byte-stable between runs.

use std::fmt::{self, Write};

use crate::{DeploymentManifest, ServiceSpec};

/// Anchor name of the shared service template.
pub const DEFAULTS_ANCHOR: &str = "pqb_base";

/// Float rendering that always keeps a fractional part (`8.0`, `2.5`),
/// using the shortest representation that round-trips.
pub fn format_share(value: f64) -> String {
    format!("{:?}", value)
}

impl fmt::Display for DeploymentManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_preamble(f)?;
        for service in &self.services {
            self.write_service(f, service)?;
        }
        Ok(())
    }
}

impl DeploymentManifest {
    /// Full manifest text.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_preamble<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "version: \"{}\"", self.version)?;
        writeln!(out)?;
        writeln!(out, "networks:")?;
        writeln!(out, "  {}:", self.network.name)?;
        writeln!(out, "    driver: bridge")?;
        writeln!(out, "    ipam:")?;
        writeln!(out, "      driver: default")?;
        writeln!(out, "      config:")?;
        writeln!(out, "        - subnet: {}", self.network.subnet)?;
        writeln!(out, "          gateway: {}", self.network.gateway)?;
        writeln!(out)?;
        writeln!(out, "x-defaults: &{}", DEFAULTS_ANCHOR)?;
        writeln!(out, "  image: {}", self.defaults.image)?;
        writeln!(out, "  deploy:")?;
        writeln!(out, "    resources:")?;
        writeln!(out, "      limits:")?;
        writeln!(out, "        cpus: \"{}\"", format_share(self.defaults.cpus))?;
        writeln!(
            out,
            "        memory: \"{}M\"",
            format_share(self.defaults.memory_mb)
        )?;
        writeln!(out, "  privileged: true")?;
        writeln!(out, "  stdin_open: true")?;
        writeln!(out, "  tty: true")?;
        writeln!(out)?;
        writeln!(out, "services:")
    }

    fn write_service<W: Write>(&self, out: &mut W, service: &ServiceSpec) -> fmt::Result {
        let name = service.name();
        writeln!(out)?;
        writeln!(out, "  {}:", name)?;
        writeln!(out, "    <<: *{}", DEFAULTS_ANCHOR)?;
        writeln!(out, "    container_name: {}", name)?;
        writeln!(out, "    command: [\"sh\", \"-c\", \"{}\"]", service.command)?;
        writeln!(out, "    ports:")?;
        writeln!(
            out,
            "      - \"{}:{}\"",
            service.host_port, service.container_port
        )?;
        writeln!(out, "    networks:")?;
        writeln!(out, "      {}:", self.network.name)?;
        writeln!(out, "        ipv4_address: {}", service.ipv4_address)
    }
}
