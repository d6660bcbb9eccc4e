//! ## pqb-bench-stats::patterns
//! Regex scrapers for the three benchmark figures. All functions return the
//! matches in file order, as written (no numeric conversion).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Summary line pqb prints on exit.
    static ref BYTES_PROCESSED: Regex =
        Regex::new(r"The program has processed \(send/receive\) (\d+) of bytes in messages\.")
            .expect("bytes pattern is valid");
    /// `perf stat` counter line.
    static ref CPU_CYCLES: Regex = Regex::new(r"(\d+)\s+cycles").expect("cycles pattern is valid");
    /// `docker stats` memory column, e.g. `12.5MiB / 7.7GiB`.
    static ref MEMORY_USAGE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)[a-zA-Z]{3}\s/").expect("memory pattern is valid");
}

fn captures(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn bytes_transmitted(text: &str) -> Vec<String> {
    captures(&BYTES_PROCESSED, text)
}

pub fn cpu_cycles(text: &str) -> Vec<String> {
    captures(&CPU_CYCLES, text)
}

/// Memory samples with the decimal point written as a comma, which is what
/// the spreadsheet the reports are pasted into expects.
pub fn memory_allocations(text: &str) -> Vec<String> {
    captures(&MEMORY_USAGE, text)
        .into_iter()
        .map(|sample| sample.replace('.', ","))
        .collect()
}
