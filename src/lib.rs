//! Parallel twin-prime counter.
//!
//! Counts the primes below a bound and collects the twin-prime members among them,
//! partitioning the candidates across worker threads. See [`scan`] for the
//! partitioning and aggregation strategy and [`primality`] for the trial-division test.

pub mod error;
pub mod primality;
pub mod prompt;
pub mod scan;

pub use error::{InputError, ScanError};
pub use primality::{TrialDivision, is_prime};
pub use scan::{ScanConfig, ScanReport, ScanResult, run_scan};
