//! ## pqb-bench-commands::runner
//! **Per-node command playback**
//!
//! Each benchmark container pipes this runner into the pqb prompt. The runner
//! walks the generated script, writes the commands addressed to its node
//! (without the node prefix) and waits between them:
//! - after every command it hands over, a fixed delay
//! - on `sleep <ms>`, the given number of milliseconds
//!
//! Lines for other nodes and blank lines are skipped.

use std::io::Write;
use std::time::Duration;

use tracing::debug;

use crate::ScriptError;

/// Source of waiting. Production uses the wall clock; tests and dry runs
/// only account for the time.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only advances a counter.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualClock {
    elapsed: Duration,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Clock for VirtualClock {
    fn sleep(&mut self, duration: Duration) {
        self.elapsed += duration;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands written for the node.
    pub commands: usize,
    /// Total time spent waiting.
    pub waited: Duration,
}

pub struct CommandRunner<C: Clock> {
    node: String,
    command_delay: Duration,
    clock: C,
}

impl<C: Clock> CommandRunner<C> {
    pub fn new(node: impl Into<String>, command_delay: Duration, clock: C) -> Self {
        Self {
            node: node.into(),
            command_delay,
            clock,
        }
    }

    #[cfg(test)]
    pub(crate) fn clock(&self) -> &C {
        &self.clock
    }

    /// Plays `script` into `sink`, flushing after every command so the
    /// consuming process sees it before the delay starts.
    pub fn replay<W: Write>(
        &mut self,
        script: &str,
        sink: &mut W,
    ) -> Result<ReplaySummary, ScriptError> {
        let mut summary = ReplaySummary::default();

        for (i, line) in script.lines().enumerate() {
            let (target, rest) = line.split_once(' ').unwrap_or((line, ""));

            if target == self.node {
                writeln!(sink, "{}", rest)?;
                sink.flush()?;
                self.wait(self.command_delay, &mut summary);
                summary.commands += 1;
            } else if target == "sleep" {
                let millis = rest
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ScriptError::InvalidDuration {
                        line: i + 1,
                        value: rest.trim().to_string(),
                    })?;
                self.wait(Duration::from_millis(millis), &mut summary);
            }
        }

        debug!(
            node = %self.node,
            commands = summary.commands,
            waited_ms = summary.waited.as_millis() as u64,
            "Replay finished"
        );
        Ok(summary)
    }

    fn wait(&mut self, duration: Duration, summary: &mut ReplaySummary) {
        self.clock.sleep(duration);
        summary.waited += duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "node1 createTx 10 10.5.0.3\nnode2 createTx 5 10.5.0.2\nsleep 1500\nnode1 exit\nsleep 500\nnode2 exit\n\nsleep 500\n";

    fn runner(node: &str) -> CommandRunner<VirtualClock> {
        CommandRunner::new(node, Duration::from_millis(500), VirtualClock::new())
    }

    #[test]
    fn writes_only_own_commands_without_prefix() {
        let mut out = Vec::new();
        let summary = runner("node1").replay(SCRIPT, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "createTx 10 10.5.0.3\nexit\n");
        assert_eq!(summary.commands, 2);
    }

    #[test]
    fn waits_for_sleeps_and_command_delay() {
        let mut runner = runner("node2");
        let summary = runner.replay(SCRIPT, &mut std::io::sink()).unwrap();
        // 1500 + 500 + 500 of sleeps, plus two commands of 500 each.
        assert_eq!(summary.waited, Duration::from_millis(3500));
        assert_eq!(runner.clock().elapsed(), summary.waited);
    }

    #[test]
    fn node_names_match_exactly() {
        let mut out = Vec::new();
        let summary = runner("node1")
            .replay("node10 exit\nnode1 exit\n", &mut out)
            .unwrap();
        assert_eq!(summary.commands, 1);
        assert_eq!(out, b"exit\n");
    }

    #[test]
    fn invalid_sleep_is_rejected() {
        let err = runner("node1")
            .replay("node1 exit\nsleep soon\n", &mut std::io::sink())
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidDuration { line: 2, .. }));
    }
}
