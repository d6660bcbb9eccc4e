//! # pqb-bench Configuration
//!
//! Layered configuration for the benchmark tools. Everything that used to be a
//! hard-coded constant in the tooling (benchmark topology, resource budgets,
//! network layout, delays) lives here with its historical value as default.
//!
//! ## Hierarchy
//! 1. Default values
//! 2. `config/pqb-bench.yaml` (or an explicit path)
//! 3. `PQB_BENCH_*` environment variables, nested with `__`

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod commands;
mod error;
mod manifest;
mod telemetry;
mod topology;
mod validation;

pub use commands::CommandsConfig;
pub use error::ConfigError;
pub use manifest::ManifestConfig;
pub use telemetry::TelemetryConfig;
pub use topology::TopologyConfig;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/pqb-bench.yaml";

/// Prefix for environment overrides, e.g. `PQB_BENCH_TOPOLOGY__ROUNDS=3`.
pub const ENV_PREFIX: &str = "PQB_BENCH_";

/// Top-level configuration container for all benchmark tools.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Node counts and rounds scanned by the stats extractor.
    #[validate(nested)]
    pub topology: TopologyConfig,

    /// Command script generation and replay.
    #[validate(nested)]
    pub commands: CommandsConfig,

    /// Deployment manifest layout and resource budgets.
    #[validate(nested)]
    pub manifest: ManifestConfig,

    /// Logging.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl BenchConfig {
    /// Load configuration from defaults, the default file when present, and
    /// the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(BenchConfig::default()));

        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            figment = figment.merge(Yaml::file(DEFAULT_CONFIG_PATH));
        } else {
            debug!("{} not found, using default configuration", DEFAULT_CONFIG_PATH);
        }

        Self::finish(figment)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let figment =
            Figment::from(Serialized::defaults(BenchConfig::default())).merge(Yaml::file(path));
        Self::finish(figment)
    }

    /// Explicit path when given, the default lookup otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn default_config_validates() {
        let config = BenchConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        Jail::expect_with(|jail| {
            jail.set_env("PQB_BENCH_TOPOLOGY__ROUNDS", "3");
            jail.set_env("PQB_BENCH_MANIFEST__TOTAL_CPUS", "4");
            let config = BenchConfig::load().expect("config loads");
            assert_eq!(config.topology.rounds, 3);
            assert_eq!(config.manifest.total_cpus, 4.0);
            assert_eq!(config.topology.node_counts, vec![3, 5, 10, 15, 20]);
            Ok(())
        });
    }

    #[test]
    fn default_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                DEFAULT_CONFIG_PATH,
                "topology:\n  node_counts: [4, 8]\n  rounds: 2\ncommands:\n  exit_settle_ms: 250\n",
            )?;
            let config = BenchConfig::load().expect("config loads");
            assert_eq!(config.topology.node_counts, vec![4, 8]);
            assert_eq!(config.topology.rounds, 2);
            assert_eq!(config.commands.exit_settle_ms, 250);
            assert_eq!(config.commands.command_delay_ms, 500);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = BenchConfig::load_from_path("missing/bench.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bench.yaml",
                "topology:\n  node_counts: []\nmanifest:\n  gateway: 10.6.0.1\n",
            )?;
            let err = BenchConfig::load_from_path("bench.yaml").unwrap_err();
            let message = err.to_string();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(message.contains("empty_node_counts"), "{message}");
            Ok(())
        });
    }

    #[test]
    fn duplicate_counts_and_nan_budget_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bench.yaml",
                "topology:\n  node_counts: [3, 5, 3]\nmanifest:\n  total_cpus: .nan\n",
            )?;
            let message = BenchConfig::load_from_path("bench.yaml")
                .unwrap_err()
                .to_string();
            assert!(message.contains("duplicate_node_count"), "{message}");
            assert!(message.contains("manifest.total_cpus"), "{message}");
            assert!(message.contains("invalid_budget"), "{message}");
            Ok(())
        });
    }
}
