//! ## pqb-bench-commands::generator
//! **Receiver resolution**
//!
//! Rewrites `createTx` receivers from `node<M>` to the address of node `M`
//! and filters out commands for nodes that are not part of the configuration.
//! Filtering is a policy decision, not an error: dropped commands are
//! returned next to the output so callers can report them.

use std::fmt;

use pqb_bench_core::{NodeConfiguration, NodeRef};
use tracing::debug;

use crate::script::{parse_script, Command};
use crate::ScriptError;

/// Why a command was left out of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    SenderNotConfigured(NodeRef),
    ReceiverNotConfigured(NodeRef),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::SenderNotConfigured(node) => write!(f, "sender {} is not configured", node),
            DropReason::ReceiverNotConfigured(node) => {
                write!(f, "receiver {} is not configured", node)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedCommand {
    /// 1-based line number in the source script.
    pub line: usize,
    pub command: String,
    pub reason: DropReason,
}

/// Output of [`CommandGenerator::generate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedScript {
    lines: Vec<String>,
    dropped: Vec<DroppedCommand>,
}

impl GeneratedScript {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn dropped(&self) -> &[DroppedCommand] {
        &self.dropped
    }

    /// Every emitted line terminated by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    fn drop_line(&mut self, line: usize, raw: &str, reason: DropReason) {
        self.dropped.push(DroppedCommand {
            line,
            command: raw.trim().to_string(),
            reason,
        });
    }
}

pub struct CommandGenerator<'a> {
    nodes: &'a NodeConfiguration,
    exit_settle_ms: u64,
}

impl<'a> CommandGenerator<'a> {
    pub fn new(nodes: &'a NodeConfiguration, exit_settle_ms: u64) -> Self {
        Self {
            nodes,
            exit_settle_ms,
        }
    }

    pub fn generate(&self, script: &str) -> Result<GeneratedScript, ScriptError> {
        let parsed = parse_script(script)?;
        let last = parsed.len();
        let mut out = GeneratedScript::default();

        for (position, line) in parsed.iter().enumerate() {
            if let Some(sender) = line.command.sender() {
                if !self.nodes.contains(sender) {
                    out.drop_line(line.number, line.raw, DropReason::SenderNotConfigured(sender));
                    continue;
                }
            }

            match line.command {
                Command::Sleep { .. } | Command::Other { .. } => out.lines.push(line.raw.to_string()),
                Command::CreateTx {
                    sender_token,
                    amount,
                    receiver,
                    ..
                } => match self.nodes.resolve(receiver) {
                    Some(address) => out
                        .lines
                        .push(format!("{} createTx {} {}", sender_token, amount, address)),
                    None => out.drop_line(
                        line.number,
                        line.raw,
                        DropReason::ReceiverNotConfigured(receiver),
                    ),
                },
                Command::Exit { .. } => {
                    out.lines.push(line.raw.to_string());
                    // Blank line after the final exit keeps terminal output readable.
                    if position + 1 == last {
                        out.lines.push(String::new());
                    }
                    out.lines.push(format!("sleep {}", self.exit_settle_ms));
                }
            }
        }

        debug!(
            emitted = out.lines.len(),
            dropped = out.dropped.len(),
            "Command script generated"
        );
        Ok(out)
    }
}
