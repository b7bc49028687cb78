//! Configuration for a parallel scan.

use crate::error::ScanError;
use crate::primality::TrialDivision;
use std::time::Duration;

/// How partial results from workers are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Workers update one tally behind a mutex, locking only for the update itself.
    Locked,
    /// Workers keep a private tally and the coordinator merges them after the join.
    #[default]
    Reduce,
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Locked => write!(f, "locked"),
            Aggregation::Reduce => write!(f, "reduce"),
        }
    }
}

/// Configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Exclusive upper bound of the search; values <= 2 give an empty scan.
    pub range: i64,
    /// Requested number of workers. Must be positive.
    pub workers: i64,
    /// How worker tallies are combined.
    pub aggregation: Aggregation,
    /// Divisor bound used for every primality test.
    pub trial_division: TrialDivision,
    /// Overall timeout; the scan is cancelled cooperatively when it elapses.
    pub timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            range: 0,
            workers: num_cpus::get() as i64,
            aggregation: Aggregation::default(),
            trial_division: TrialDivision::default(),
            timeout: None,
        }
    }
}

impl ScanConfig {
    /// Create a config for scanning [2, range) with the given number of workers.
    pub fn new(range: i64, workers: i64) -> Self {
        Self {
            range,
            workers,
            ..Default::default()
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_trial_division(mut self, trial_division: TrialDivision) -> Self {
        self.trial_division = trial_division;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the overall timeout from an Option.
    pub fn with_timeout_option(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject configurations that cannot be scanned.
    ///
    /// Only the worker count is checked; any range is valid.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.workers <= 0 {
            return Err(ScanError::InvalidConfiguration(format!(
                "worker count must be positive, got {}",
                self.workers
            )));
        }
        Ok(())
    }
}
