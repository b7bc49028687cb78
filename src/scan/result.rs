//! Scan result types and statistics

use crate::primality::TrialDivision;
use crate::scan::channel::Tally;
use crate::scan::config::Aggregation;
use crate::scan::partition::Chunk;
use std::time::Duration;

/// Final outcome of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Number of primes in [2, range).
    pub prime_count: u64,
    /// Every twin-prime member found, ascending, without duplicates.
    pub twins: Vec<i64>,
    /// Every detected pair `(p, p + 2)`, ascending by `p`.
    pub pairs: Vec<(i64, i64)>,
}

impl ScanResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pair members in pair order, e.g. `[3, 5, 5, 7]` for the pairs (3,5) and (5,7).
    pub fn flattened_pairs(&self) -> Vec<i64> {
        self.pairs.iter().flat_map(|&(lo, hi)| [lo, hi]).collect()
    }

    /// Members joined the way the CLI prints them.
    pub fn format_twins(&self) -> String {
        self.twins
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(" , ")
    }
}

impl From<Tally> for ScanResult {
    fn from(tally: Tally) -> Self {
        // BTreeSet iteration is already ascending
        Self {
            prime_count: tally.prime_count,
            twins: tally.twins.into_iter().collect(),
            pairs: tally.pair_starts.into_iter().map(|p| (p, p + 2)).collect(),
        }
    }
}

/// What one worker did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerStatistics {
    pub worker_id: usize,
    pub chunk: Chunk,
    pub candidates_evaluated: u64,
    pub primes_found: u64,
    pub twin_pairs_found: u64,
}

impl WorkerStatistics {
    pub fn new(chunk: Chunk) -> Self {
        Self {
            worker_id: chunk.worker_id,
            chunk,
            candidates_evaluated: 0,
            primes_found: 0,
            twin_pairs_found: 0,
        }
    }

    /// Whether every candidate in the chunk was examined.
    pub fn is_complete(&self) -> bool {
        self.candidates_evaluated == self.chunk.len()
    }
}

/// Statistics from a scan
#[derive(Debug, Clone, Default)]
pub struct ScanStatistics {
    /// Wall-clock time from validation to the final merge
    pub elapsed_time: Duration,
    /// Number of workers actually spawned
    pub workers: usize,
    pub aggregation: Aggregation,
    pub trial_division: TrialDivision,
    /// Candidates examined across all workers
    pub candidates_evaluated: u64,
    /// Per-worker statistics, ordered by worker id
    pub per_worker: Vec<WorkerStatistics>,
}

impl ScanStatistics {
    /// Get candidates evaluated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.candidates_evaluated as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Workers: {}\n", self.workers));
        s.push_str(&format!("Aggregation: {}\n", self.aggregation));
        s.push_str(&format!("Trial division: {}\n", self.trial_division));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Candidates evaluated: {}\n",
            self.candidates_evaluated
        ));
        s.push_str(&format!(
            "Throughput: {:.0} candidates/sec\n",
            self.throughput()
        ));
        for worker in &self.per_worker {
            s.push_str(&format!(
                "  Worker {} {}: {} candidates, {} primes, {} twin pairs\n",
                worker.worker_id,
                worker.chunk,
                worker.candidates_evaluated,
                worker.primes_found,
                worker.twin_pairs_found
            ));
        }
        s
    }
}

/// Result plus the statistics gathered while producing it.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub result: ScanResult,
    pub statistics: ScanStatistics,
}
