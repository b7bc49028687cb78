//! Worker/coordinator messages and the state shared across one scan.

use crate::error::ScanError;
use crate::scan::result::WorkerStatistics;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Prime count and twin findings accumulated over some part of the range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub prime_count: u64,
    /// Lower member of each detected pair; the upper member is always `p + 2`.
    pub pair_starts: BTreeSet<i64>,
    /// Both members of every detected pair, deduplicated.
    pub twins: BTreeSet<i64>,
}

impl Tally {
    pub fn record_prime(&mut self) {
        self.prime_count += 1;
    }

    pub fn record_pair(&mut self, low: i64, high: i64) {
        self.pair_starts.insert(low);
        self.twins.insert(low);
        self.twins.insert(high);
    }

    /// Fold another tally into this one. Order of merging does not matter.
    pub fn merge(&mut self, other: Tally) {
        self.prime_count += other.prime_count;
        self.pair_starts.extend(other.pair_starts);
        self.twins.extend(other.twins);
    }
}

/// Message sent from a worker to the coordinator.
#[derive(Debug)]
pub enum WorkerMessage {
    /// Worker ran its chunk to completion or stopped on request.
    Finished {
        statistics: WorkerStatistics,
        /// Private tally, present only under reduce aggregation.
        tally: Option<Tally>,
    },
    /// Worker hit an unrecoverable error.
    Error { worker_id: usize, error: ScanError },
}

/// State visible to every worker of a single scan.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Tally used by the locked aggregation strategy.
    tally: Mutex<Tally>,
    /// Flag to signal all workers to stop.
    should_stop: AtomicBool,
}

impl SharedState {
    /// Lock the shared tally. A poisoned lock means another worker panicked mid-update.
    pub fn lock_tally(&self, worker_id: usize) -> Result<MutexGuard<'_, Tally>, ScanError> {
        self.tally
            .lock()
            .map_err(|_| ScanError::WorkerPanicked { worker_id })
    }

    /// Take the accumulated shared tally, leaving an empty one behind.
    pub fn take_tally(&self) -> Tally {
        match self.tally.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Check if we should stop scanning.
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::Relaxed)
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::Relaxed);
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared state for the locked tally and the stop flag.
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    pub shared: Arc<SharedState>,
}

/// Create channels for a scan with the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let shared = Arc::new(SharedState::default());

    // Workers send exactly one message each and must never block on it
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        shared,
    };

    (coordinator, worker_channels)
}
