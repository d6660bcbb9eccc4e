//! ## pqb-bench-commands::script
//! Zero-copy parser for command script lines.

use std::path::Path;

use pqb_bench_core::NodeRef;

use crate::ScriptError;

const SLEEP: &str = "sleep";
const CREATE_TX: &str = "createTx";
const EXIT: &str = "exit";

/// One recognised command. Borrowed slices point into the script text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `sleep <duration>`; the duration is kept as written.
    Sleep { duration: Option<&'a str> },
    /// `node<N> createTx <amount> node<M>`; `sender_token` is `node<N>` as written.
    CreateTx {
        sender: NodeRef,
        sender_token: &'a str,
        amount: &'a str,
        receiver: NodeRef,
    },
    /// `node<N> exit`
    Exit { sender: NodeRef },
    /// `node<N> <anything else>`
    Other { sender: NodeRef },
}

impl Command<'_> {
    /// Node the command is addressed to; `None` for `sleep`.
    pub fn sender(&self) -> Option<NodeRef> {
        match self {
            Command::Sleep { .. } => None,
            Command::CreateTx { sender, .. }
            | Command::Exit { sender }
            | Command::Other { sender } => Some(*sender),
        }
    }
}

/// A parsed, non-blank script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    /// 1-based line number in the script file.
    pub number: usize,
    /// The line exactly as written, without its line terminator.
    pub raw: &'a str,
    pub command: Command<'a>,
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_line(number: usize, raw: &str) -> Result<Option<ScriptLine<'_>>, ScriptError> {
    let mut tokens = raw.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    if first == SLEEP {
        return Ok(Some(ScriptLine {
            number,
            raw,
            command: Command::Sleep {
                duration: tokens.next(),
            },
        }));
    }

    let sender = parse_node(number, first)?;
    let verb = tokens.next().ok_or(ScriptError::MissingToken {
        line: number,
        what: "command after node",
    })?;

    let command = match verb {
        CREATE_TX => {
            let amount = tokens.next().ok_or(ScriptError::MissingToken {
                line: number,
                what: "createTx amount",
            })?;
            let receiver = tokens.next().ok_or(ScriptError::MissingToken {
                line: number,
                what: "createTx receiver",
            })?;
            Command::CreateTx {
                sender,
                sender_token: first,
                amount,
                receiver: parse_node(number, receiver)?,
            }
        }
        EXIT => Command::Exit { sender },
        _ => Command::Other { sender },
    };

    Ok(Some(ScriptLine {
        number,
        raw,
        command,
    }))
}

fn parse_node(line: usize, token: &str) -> Result<NodeRef, ScriptError> {
    token
        .parse()
        .map_err(|source| ScriptError::InvalidNode { line, source })
}

/// Parses a whole script, skipping blank lines.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine<'_>>, ScriptError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if let Some(line) = parse_line(i + 1, raw)? {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Reads a script file into memory.
pub fn read_script<P: AsRef<Path>>(path: P) -> Result<String, ScriptError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScriptError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}
