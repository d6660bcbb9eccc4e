//! ## pqb-bench-stats::report
//! Report blocks appended to `<alg>-<n>.out`.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::StatsError;

/// One node's figures for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cycles: String,
    pub memory: String,
    pub bytes: String,
}

/// All nodes of one round. Rendered as a blank line, `Round: <r>` and one
/// `<cycles> <memory> <bytes>` line per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    pub node_count: usize,
    pub round: u32,
    pub rows: Vec<ReportRow>,
}

impl fmt::Display for ReportBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\nRound: {}\n", self.round)?;
        for row in &self.rows {
            writeln!(f, "{} {} {}", row.cycles, row.memory, row.bytes)?;
        }
        Ok(())
    }
}

/// Report opened for appending.
#[derive(Debug)]
pub struct ReportFile {
    path: PathBuf,
    file: File,
    created: bool,
}

impl ReportFile {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, StatsError> {
        let created = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| StatsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            created,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `blocks` in a single write.
    pub fn append(&mut self, blocks: &[&ReportBlock]) -> Result<(), StatsError> {
        let mut buffer = String::new();
        for block in blocks {
            buffer.push_str(&block.to_string());
        }
        self.file
            .write_all(buffer.as_bytes())
            .map_err(|source| StatsError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Closes the report, removing it if `open` created it.
    pub fn discard(self) {
        let Self { path, file, created } = self;
        drop(file);
        if created {
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), %err, "Failed to remove empty report");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(round: u32) -> ReportBlock {
        ReportBlock {
            node_count: 2,
            round,
            rows: vec![
                ReportRow {
                    cycles: "100".into(),
                    memory: "1,5".into(),
                    bytes: "2000".into(),
                },
                ReportRow {
                    cycles: "200".into(),
                    memory: "2".into(),
                    bytes: "3000".into(),
                },
            ],
        }
    }

    #[test]
    fn renders_round_block() {
        assert_eq!(
            block(3).to_string(),
            "\nRound: 3\n100 1,5 2000\n200 2 3000\n"
        );
    }

    #[test]
    fn appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("falcon512-2.out");
        let first = block(1);
        let second = block(2);
        ReportFile::open(&path).unwrap().append(&[&first]).unwrap();
        ReportFile::open(&path).unwrap().append(&[&second]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("{}{}", first, second));
    }

    #[test]
    fn discard_only_removes_new_reports() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("sig-1.out");
        let existing = dir.path().join("sig-2.out");
        std::fs::write(&existing, "kept").unwrap();

        ReportFile::open(&fresh).unwrap().discard();
        ReportFile::open(&existing).unwrap().discard();
        assert!(!fresh.exists());
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "kept");
    }
}
