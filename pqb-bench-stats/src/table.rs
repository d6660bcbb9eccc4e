//! Memory samples per cluster size.

use std::collections::BTreeMap;

/// Memory samples keyed by node count. For node count `n`, the sample of
/// node `i` (0-based) in round `r` (1-based) sits at `(r - 1) * n + i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    samples: BTreeMap<usize, Vec<String>>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node_count: usize, samples: Vec<String>) {
        self.samples.insert(node_count, samples);
    }

    pub fn samples(&self, node_count: usize) -> Option<&[String]> {
        self.samples.get(&node_count).map(Vec::as_slice)
    }

    pub fn sample(&self, node_count: usize, round: u32, node: usize) -> Option<&str> {
        let index = Self::index(node_count, round, node);
        self.samples(node_count)?.get(index).map(String::as_str)
    }

    pub fn index(node_count: usize, round: u32, node: usize) -> usize {
        (round as usize).saturating_sub(1) * node_count + node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_by_round_then_node() {
        let mut table = StatsTable::new();
        table.insert(2, ["1,0", "2,0", "3,0", "4,0"].map(String::from).to_vec());
        assert_eq!(table.sample(2, 1, 0), Some("1,0"));
        assert_eq!(table.sample(2, 1, 1), Some("2,0"));
        assert_eq!(table.sample(2, 2, 0), Some("3,0"));
        assert_eq!(table.sample(2, 2, 1), Some("4,0"));
        assert_eq!(table.sample(2, 3, 0), None);
        assert_eq!(table.sample(5, 1, 0), None);
    }
}
