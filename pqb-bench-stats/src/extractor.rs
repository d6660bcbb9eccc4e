//! ## pqb-bench-stats::extractor
//! **Results directory walk**
//!
//! 1. Load the memory samples of every configured node count.
//! 2. Scrape cycles and bytes from every `(node count, round)` log.
//! 3. Append the round blocks to the per node count report.
//!
//! Steps 1 and 2 finish before anything is written, so a missing or
//! truncated log leaves existing reports as they were. Every report is
//! opened before the first append, so an unwritable report does too.
//! A node count listed twice is processed once.

use std::path::{Path, PathBuf};

use pqb_bench_config::TopologyConfig;
use tracing::{debug, info};

use crate::report::{ReportBlock, ReportFile, ReportRow};
use crate::{patterns, Metric, StatsError, StatsTable};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Reports that received new blocks.
    pub reports: Vec<PathBuf>,
    pub blocks: usize,
}

pub struct StatExtractor<'a> {
    algorithm: &'a str,
    directory: PathBuf,
    topology: &'a TopologyConfig,
}

impl<'a> StatExtractor<'a> {
    pub fn new(
        algorithm: &'a str,
        directory: impl Into<PathBuf>,
        topology: &'a TopologyConfig,
    ) -> Self {
        Self {
            algorithm,
            directory: directory.into(),
            topology,
        }
    }

    pub fn stats_path(&self, node_count: usize) -> PathBuf {
        self.directory
            .join(format!("stats-{}-{}.txt", self.algorithm, node_count))
    }

    pub fn round_log_path(&self, node_count: usize, round: u32) -> PathBuf {
        self.directory
            .join(format!("{}-{}-{}.txt", self.algorithm, node_count, round))
    }

    pub fn report_path(&self, node_count: usize) -> PathBuf {
        self.directory
            .join(format!("{}-{}.out", self.algorithm, node_count))
    }

    /// Configured node counts, first occurrence only.
    pub fn node_counts(&self) -> Vec<usize> {
        let mut counts = Vec::with_capacity(self.topology.node_counts.len());
        for &count in &self.topology.node_counts {
            if !counts.contains(&count) {
                counts.push(count);
            }
        }
        counts
    }

    /// Runs the whole extraction and appends to the reports.
    pub fn extract(&self) -> Result<ExtractionSummary, StatsError> {
        let stats = self.load_stats()?;
        let blocks = self.collect_blocks(&stats)?;
        let mut reports = self.open_reports()?;

        let mut summary = ExtractionSummary::default();
        for (node_count, report) in &mut reports {
            let ours: Vec<&ReportBlock> = blocks
                .iter()
                .filter(|block| block.node_count == *node_count)
                .collect();
            report.append(&ours)?;
            debug!(report = %report.path().display(), blocks = ours.len(), "Report appended");
            summary.blocks += ours.len();
            summary.reports.push(report.path().to_path_buf());
        }

        info!(
            algorithm = self.algorithm,
            reports = summary.reports.len(),
            blocks = summary.blocks,
            "Statistics extracted"
        );
        Ok(summary)
    }

    /// Opens every report up front. If one cannot be opened, reports created
    /// by this call are removed again.
    fn open_reports(&self) -> Result<Vec<(usize, ReportFile)>, StatsError> {
        let mut reports = Vec::new();
        for node_count in self.node_counts() {
            match ReportFile::open(&self.report_path(node_count)) {
                Ok(report) => reports.push((node_count, report)),
                Err(err) => {
                    for (_, report) in reports {
                        report.discard();
                    }
                    return Err(err);
                }
            }
        }
        Ok(reports)
    }

    pub fn load_stats(&self) -> Result<StatsTable, StatsError> {
        let mut table = StatsTable::new();
        for node_count in self.node_counts() {
            let path = self.stats_path(node_count);
            let samples = patterns::memory_allocations(&read(&path)?);
            debug!(path = %path.display(), samples = samples.len(), "Memory samples loaded");
            table.insert(node_count, samples);
        }
        Ok(table)
    }

    pub fn collect_blocks(&self, stats: &StatsTable) -> Result<Vec<ReportBlock>, StatsError> {
        let mut blocks = Vec::new();
        for node_count in self.node_counts() {
            for round in 1..=self.topology.rounds {
                blocks.push(self.round_block(stats, node_count, round)?);
            }
        }
        Ok(blocks)
    }

    fn round_block(
        &self,
        stats: &StatsTable,
        node_count: usize,
        round: u32,
    ) -> Result<ReportBlock, StatsError> {
        let path = self.round_log_path(node_count, round);
        let text = read(&path)?;
        let bytes = patterns::bytes_transmitted(&text);
        let cycles = patterns::cpu_cycles(&text);

        require(&path, Metric::CpuCycles, node_count, cycles.len())?;
        require(&path, Metric::BytesTransmitted, node_count, bytes.len())?;

        let found = stats.samples(node_count).map_or(0, <[String]>::len);
        let needed = StatsTable::index(node_count, round, node_count);
        require(
            &self.stats_path(node_count),
            Metric::MemoryAllocated,
            needed,
            found,
        )?;

        let rows = cycles
            .into_iter()
            .zip(bytes)
            .take(node_count)
            .enumerate()
            .map(|(node, (cycles, bytes))| ReportRow {
                cycles,
                memory: stats
                    .sample(node_count, round, node)
                    .unwrap_or_default()
                    .to_string(),
                bytes,
            })
            .collect();

        Ok(ReportBlock {
            node_count,
            round,
            rows,
        })
    }
}

fn read(path: &Path) -> Result<String, StatsError> {
    std::fs::read_to_string(path).map_err(|source| StatsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn require(path: &Path, metric: Metric, needed: usize, found: usize) -> Result<(), StatsError> {
    if found < needed {
        return Err(StatsError::MissingSamples {
            path: path.to_path_buf(),
            metric,
            needed,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn topology(node_counts: Vec<usize>, rounds: u32) -> TopologyConfig {
        TopologyConfig {
            node_counts,
            rounds,
        }
    }

    fn round_log(cycles: &[u64], bytes: &[u64]) -> String {
        let mut text = String::new();
        for b in bytes {
            text.push_str(&format!(
                "The program has processed (send/receive) {} of bytes in messages.\n",
                b
            ));
        }
        for c in cycles {
            text.push_str(&format!("     {}      cycles\n", c));
        }
        text
    }

    fn stats_log(samples: &[&str]) -> String {
        samples
            .iter()
            .map(|s| format!("abc   node   {}MiB / 7.7GiB\n", s))
            .collect()
    }

    #[test]
    fn writes_one_line_per_node_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("stats-falcon512-2.txt"),
            stats_log(&["1.5", "2.25", "3", "4.75"]),
        )
        .unwrap();
        fs::write(root.join("falcon512-2-1.txt"), round_log(&[10, 11], &[100, 101])).unwrap();
        fs::write(root.join("falcon512-2-2.txt"), round_log(&[20, 21], &[200, 201])).unwrap();

        let topology = topology(vec![2], 2);
        let summary = StatExtractor::new("falcon512", root, &topology)
            .extract()
            .unwrap();
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.reports, vec![root.join("falcon512-2.out")]);

        let report = fs::read_to_string(root.join("falcon512-2.out")).unwrap();
        assert_eq!(
            report,
            "\nRound: 1\n10 1,5 100\n11 2,25 101\n\nRound: 2\n20 3 200\n21 4,75 201\n"
        );
    }

    #[test]
    fn extra_matches_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-1.txt"), stats_log(&["7"])).unwrap();
        fs::write(root.join("sig-1-1.txt"), round_log(&[5, 6, 7], &[50, 60])).unwrap();

        let topology = topology(vec![1], 1);
        let extractor = StatExtractor::new("sig", root, &topology);
        let stats = extractor.load_stats().unwrap();
        let blocks = extractor.collect_blocks(&stats).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rows.len(), 1);
        assert_eq!(blocks[0].rows[0].cycles, "5");
    }

    #[test]
    fn missing_log_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-1.txt"), stats_log(&["1", "2"])).unwrap();
        fs::write(root.join("sig-1-1.txt"), round_log(&[1], &[1])).unwrap();

        let topology = topology(vec![1], 2);
        let err = StatExtractor::new("sig", root, &topology)
            .extract()
            .unwrap_err();
        match err {
            StatsError::Read { path, .. } => assert_eq!(path, root.join("sig-1-2.txt")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!root.join("sig-1.out").exists());
    }

    #[test]
    fn repeated_node_count_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-1.txt"), stats_log(&["2"])).unwrap();
        fs::write(root.join("sig-1-1.txt"), round_log(&[9], &[90])).unwrap();

        let topology = topology(vec![1, 1], 1);
        let summary = StatExtractor::new("sig", root, &topology)
            .extract()
            .unwrap();
        assert_eq!(summary.blocks, 1);
        assert_eq!(summary.reports, vec![root.join("sig-1.out")]);
        let report = fs::read_to_string(root.join("sig-1.out")).unwrap();
        assert_eq!(report, "\nRound: 1\n9 2 90\n");
    }

    #[test]
    fn unwritable_report_leaves_others_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-1.txt"), stats_log(&["1"])).unwrap();
        fs::write(root.join("stats-sig-2.txt"), stats_log(&["1", "2"])).unwrap();
        fs::write(root.join("sig-1-1.txt"), round_log(&[1], &[1])).unwrap();
        fs::write(root.join("sig-2-1.txt"), round_log(&[1, 2], &[1, 2])).unwrap();
        fs::write(root.join("stats-sig-3.txt"), stats_log(&["1", "2", "3"])).unwrap();
        fs::write(root.join("sig-3-1.txt"), round_log(&[1, 2, 3], &[1, 2, 3])).unwrap();
        fs::write(root.join("sig-3.out"), "\nRound: 1\nold\n").unwrap();
        fs::create_dir(root.join("sig-2.out")).unwrap();

        let topology = topology(vec![1, 3, 2], 1);

        let err = StatExtractor::new("sig", root, &topology)
            .extract()
            .unwrap_err();
        match err {
            StatsError::Write { path, .. } => assert_eq!(path, root.join("sig-2.out")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!root.join("sig-1.out").exists());
        assert_eq!(
            fs::read_to_string(root.join("sig-3.out")).unwrap(),
            "\nRound: 1\nold\n"
        );
    }

    #[test]
    fn too_few_cycles_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-3.txt"), stats_log(&["1", "2", "3"])).unwrap();
        fs::write(root.join("sig-3-1.txt"), round_log(&[1, 2], &[1, 2, 3])).unwrap();

        let topology = topology(vec![3], 1);
        let err = StatExtractor::new("sig", root, &topology)
            .extract()
            .unwrap_err();
        assert!(matches!(
            err,
            StatsError::MissingSamples {
                metric: Metric::CpuCycles,
                needed: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn too_few_memory_samples_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("stats-sig-2.txt"), stats_log(&["1", "2", "3"])).unwrap();
        fs::write(root.join("sig-2-1.txt"), round_log(&[1, 2], &[1, 2])).unwrap();
        fs::write(root.join("sig-2-2.txt"), round_log(&[1, 2], &[1, 2])).unwrap();

        let topology = topology(vec![2], 2);
        let err = StatExtractor::new("sig", root, &topology)
            .extract()
            .unwrap_err();
        match err {
            StatsError::MissingSamples {
                path,
                metric,
                needed,
                found,
            } => {
                assert_eq!(path, root.join("stats-sig-2.txt"));
                assert_eq!(metric, Metric::MemoryAllocated);
                assert_eq!((needed, found), (4, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directory_with_trailing_slash() {
        let topology = topology(vec![3], 1);
        let extractor = StatExtractor::new("falcon512", "tmp/test_results/", &topology);
        assert_eq!(
            extractor.round_log_path(3, 1),
            PathBuf::from("tmp/test_results/falcon512-3-1.txt")
        );
        assert_eq!(
            extractor.report_path(3),
            PathBuf::from("tmp/test_results/falcon512-3.out")
        );
    }
}
