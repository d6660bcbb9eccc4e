//! Command script generation and replay timing.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct CommandsConfig {
    /// Sleep (ms) appended after every `exit` so nodes can print statistics.
    #[serde(default = "default_exit_settle")]
    pub exit_settle_ms: u64,

    /// Delay (ms) after each command the runner hands to its node.
    #[serde(default = "default_command_delay")]
    #[validate(range(max = 3_600_000))]
    pub command_delay_ms: u64,
}

fn default_exit_settle() -> u64 {
    500
}

fn default_command_delay() -> u64 {
    500
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            exit_settle_ms: default_exit_settle(),
            command_delay_ms: default_command_delay(),
        }
    }
}
