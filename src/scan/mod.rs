//! Parallel twin-prime scanning.
//!
//! A scan counts the primes in [2, range) and collects every twin-prime member found
//! along the way, spreading the candidates over several worker threads.
//!
//! # Architecture
//!
//! - **Partition**: [2, range) is split into contiguous, gap-free chunks whose sizes
//!   differ by at most one, one chunk per worker
//! - **Execute**: each worker walks its chunk in order; for every prime `i` it also
//!   tests `i + 2` and records the pair when both are prime
//! - **Join**: the coordinator collects one message per worker, joins the threads and
//!   produces a sorted [`ScanResult`]
//!
//! Worker tallies are combined either through a mutex-guarded shared tally
//! ([`Aggregation::Locked`]) or by merging private tallies after the join
//! ([`Aggregation::Reduce`]). Both give identical results for any worker count.
//!
//! # Example
//!
//! ```
//! use twinprime::scan::{Aggregation, ScanConfig, run_scan};
//!
//! let config = ScanConfig::new(20, 4).with_aggregation(Aggregation::Locked);
//! let report = run_scan(&config).unwrap();
//!
//! assert_eq!(report.result.prime_count, 8);
//! assert_eq!(report.result.twins, vec![3, 5, 7, 11, 13, 17, 19]);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod partition;
pub mod result;

pub use config::{Aggregation, ScanConfig};
pub use coordinator::{run_scan, scan};
pub use partition::{Chunk, SearchRange, partition};
pub use result::{ScanReport, ScanResult, ScanStatistics, WorkerStatistics};
