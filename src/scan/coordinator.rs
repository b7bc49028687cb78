//! Scan coordinator that partitions the range, runs workers and merges their tallies.

use crate::error::ScanError;
use crate::primality::TrialDivision;
use crate::scan::channel::{
    CoordinatorChannels, SharedState, Tally, WorkerChannels, WorkerMessage, create_channels,
};
use crate::scan::config::{Aggregation, ScanConfig};
use crate::scan::partition::{Chunk, SearchRange, partition};
use crate::scan::result::{ScanReport, ScanResult, ScanStatistics, WorkerStatistics};
use crossbeam_channel::RecvTimeoutError;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// How long the coordinator blocks on the channel before re-checking the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Count primes and collect twin-prime members in [2, range) using `workers` threads.
///
/// Fails with [`ScanError::InvalidConfiguration`] if `workers <= 0`; a range of 2 or
/// less is not an error and yields an empty result.
pub fn scan(range: i64, workers: i64) -> Result<ScanResult, ScanError> {
    run_scan(&ScanConfig::new(range, workers)).map(|report| report.result)
}

/// Run a scan with the given configuration.
pub fn run_scan(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    let aggregation = config.aggregation;
    let trial_division = config.trial_division;
    run_scan_with(config, |chunk, channels| {
        thread::Builder::new()
            .name(format!("scan-worker-{}", chunk.worker_id))
            .spawn(move || run_worker(chunk, aggregation, trial_division, channels))
    })
}

/// Run a scan, starting each worker through `spawn_worker`.
///
/// If any spawn fails, the workers already running are stopped and joined before the
/// error is returned.
fn run_scan_with<S>(config: &ScanConfig, mut spawn_worker: S) -> Result<ScanReport, ScanError>
where
    S: FnMut(Chunk, WorkerChannels) -> io::Result<JoinHandle<()>>,
{
    config.validate()?;

    let start_time = Instant::now();
    let range = SearchRange::new(config.range);
    let requested = usize::try_from(config.workers).unwrap_or(usize::MAX);
    let num_workers = range.effective_workers(requested);
    let chunks = partition(range, num_workers);

    debug!(
        range = config.range,
        requested = config.workers,
        workers = num_workers,
        aggregation = %config.aggregation,
        trial_division = %config.trial_division,
        "starting scan"
    );

    let (coordinator_channels, worker_channels) = create_channels(num_workers);
    let shared = Arc::clone(&coordinator_channels.shared);

    let mut worker_handles = Vec::with_capacity(num_workers);
    for (chunk, channels) in chunks.iter().copied().zip(worker_channels) {
        match spawn_worker(chunk, channels) {
            Ok(handle) => worker_handles.push(handle),
            Err(source) => {
                warn!(
                    worker_id = chunk.worker_id,
                    %source,
                    "failed to spawn worker, stopping scan"
                );
                shared.signal_stop();
                let _ = join_workers(worker_handles);
                return Err(ScanError::Spawn {
                    worker_id: chunk.worker_id,
                    source,
                });
            }
        }
    }

    let mut collected = run_coordinator(coordinator_channels, config, num_workers, start_time);

    // A panic poisons the locked tally, so it outranks errors the other workers report
    if let Some(error) = join_workers(worker_handles).or(collected.error) {
        return Err(error);
    }

    collected.per_worker.sort_by_key(|stats| stats.worker_id);
    let complete = collected.per_worker.len() == num_workers
        && collected.per_worker.iter().all(WorkerStatistics::is_complete);
    let elapsed = start_time.elapsed();

    if !complete {
        // Only reachable once the deadline has stopped the workers
        return Err(ScanError::TimedOut { elapsed });
    }

    let tally = match config.aggregation {
        Aggregation::Locked => shared.take_tally(),
        Aggregation::Reduce => collected.merged,
    };
    let result = ScanResult::from(tally);

    let statistics = ScanStatistics {
        elapsed_time: elapsed,
        workers: num_workers,
        aggregation: config.aggregation,
        trial_division: config.trial_division,
        candidates_evaluated: collected
            .per_worker
            .iter()
            .map(|stats| stats.candidates_evaluated)
            .sum(),
        per_worker: collected.per_worker,
    };

    debug!(
        primes = result.prime_count,
        twins = result.twins.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "scan finished"
    );

    Ok(ScanReport { result, statistics })
}

/// Wait for all workers to finish, returning the first panic.
fn join_workers(handles: Vec<JoinHandle<()>>) -> Option<ScanError> {
    let mut panicked = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            panicked.get_or_insert(ScanError::WorkerPanicked { worker_id });
        }
    }
    panicked
}

/// Everything the coordinator gathered from worker messages.
struct Collected {
    merged: Tally,
    per_worker: Vec<WorkerStatistics>,
    error: Option<ScanError>,
}

/// Coordinator loop that receives messages from workers and aggregates results.
fn run_coordinator(
    channels: CoordinatorChannels,
    config: &ScanConfig,
    total_workers: usize,
    start_time: Instant,
) -> Collected {
    let mut collected = Collected {
        merged: Tally::default(),
        per_worker: Vec::with_capacity(total_workers),
        error: None,
    };
    let mut finished_count = 0;
    let deadline = config.timeout.map(|t| start_time + t);
    let mut deadline_hit = false;

    while finished_count < total_workers {
        let wait = match deadline {
            Some(d) if !deadline_hit => {
                d.saturating_duration_since(Instant::now()).min(POLL_INTERVAL)
            }
            _ => POLL_INTERVAL,
        };

        match channels.from_workers.recv_timeout(wait) {
            Ok(WorkerMessage::Finished { statistics, tally }) => {
                finished_count += 1;
                if let Some(tally) = tally {
                    collected.merged.merge(tally);
                }
                collected.per_worker.push(statistics);
            }
            Ok(WorkerMessage::Error { worker_id, error }) => {
                finished_count += 1;
                warn!(worker_id, %error, "worker failed, stopping scan");
                channels.shared.signal_stop();
                collected.error.get_or_insert(error);
            }
            Err(RecvTimeoutError::Timeout) => {
                if !deadline_hit && deadline.is_some_and(|d| Instant::now() >= d) {
                    deadline_hit = true;
                    warn!(
                        elapsed_ms = start_time.elapsed().as_millis() as u64,
                        "scan deadline reached, stopping workers"
                    );
                    channels.shared.signal_stop();
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Every worker is gone; any that never reported panicked
                break;
            }
        }
    }

    collected
}

/// Worker function that scans one chunk and reports back to the coordinator.
fn run_worker(
    chunk: Chunk,
    aggregation: Aggregation,
    trial_division: TrialDivision,
    channels: WorkerChannels,
) {
    let worker_id = chunk.worker_id;
    trace!(worker_id, %chunk, "worker started");

    let mut statistics = WorkerStatistics::new(chunk);
    let mut local = Tally::default();

    let outcome = scan_chunk(
        chunk,
        aggregation,
        trial_division,
        &channels.shared,
        &mut local,
        &mut statistics,
    );

    let message = match outcome {
        Ok(()) => {
            trace!(
                worker_id,
                candidates = statistics.candidates_evaluated,
                primes = statistics.primes_found,
                "worker finished"
            );
            WorkerMessage::Finished {
                statistics,
                tally: (aggregation == Aggregation::Reduce).then_some(local),
            }
        }
        Err(error) => WorkerMessage::Error { worker_id, error },
    };

    let _ = channels.to_coordinator.send(message);
}

/// Visit every candidate of `chunk` in order, recording primes and twin pairs.
///
/// The shared lock is taken only after both primality tests, for the update itself.
fn scan_chunk(
    chunk: Chunk,
    aggregation: Aggregation,
    trial_division: TrialDivision,
    shared: &SharedState,
    local: &mut Tally,
    statistics: &mut WorkerStatistics,
) -> Result<(), ScanError> {
    for candidate in chunk.candidates() {
        if shared.should_stop() {
            break;
        }
        statistics.candidates_evaluated += 1;

        if !trial_division.is_prime(candidate) {
            continue;
        }
        statistics.primes_found += 1;

        // The partner is tested even when it lies at or past the range bound.
        // A prime candidate is at most i64::MAX - 2, so this cannot fail in practice.
        let partner = candidate
            .checked_add(2)
            .ok_or(ScanError::Overflow { value: candidate })?;
        let is_twin = trial_division.is_prime(partner);
        if is_twin {
            statistics.twin_pairs_found += 1;
        }

        match aggregation {
            Aggregation::Locked => {
                let mut tally = shared.lock_tally(chunk.worker_id)?;
                tally.record_prime();
                if is_twin {
                    tally.record_pair(candidate, partner);
                }
            }
            Aggregation::Reduce => {
                local.record_prime();
                if is_twin {
                    local.record_pair(candidate, partner);
                }
            }
        }
    }
    Ok(())
}
