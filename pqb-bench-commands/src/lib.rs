//! # pqb-bench Commands
//!
//! Command scripts drive a benchmark run: every line is either a `sleep` or a
//! command for one node (`node<N> createTx <amount> node<M>`, `node<N> exit`,
//! or anything else the pqb prompt accepts).
//!
//! - `script`: line parser
//! - `generator`: resolves receivers to addresses and filters unconfigured nodes
//! - `runner`: plays the commands of a single node with delays

pub mod error;
pub mod generator;
pub mod runner;
pub mod script;

pub use error::ScriptError;
pub use generator::{CommandGenerator, DropReason, DroppedCommand, GeneratedScript};
pub use runner::{Clock, CommandRunner, ReplaySummary, SystemClock, VirtualClock};
pub use script::{parse_script, Command, ScriptLine};
