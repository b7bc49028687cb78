use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("integer overflow probing twin partner of {value}")]
    Overflow { value: i64 },

    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error("scan timed out after {elapsed:?}")]
    TimedOut { elapsed: Duration },
}

/// Errors raised while reading numeric input from the user.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid {label} '{input}': {source}")]
    Parse {
        label: String,
        input: String,
        source: ParseIntError,
    },

    #[error("input ended before {label} was entered")]
    UnexpectedEof { label: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
