//! Contiguous partitioning of the search range across workers.

use std::ops::Range;

/// Lowest candidate examined by every scan.
pub const LOW: i64 = 2;

/// The half-open candidate interval [2, high).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub high: i64,
}

impl SearchRange {
    pub fn new(high: i64) -> Self {
        Self { high }
    }

    /// Number of candidates; zero whenever `high <= 2`.
    pub fn len(&self) -> u64 {
        if self.high <= LOW {
            0
        } else {
            (self.high - LOW) as u64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Worker count actually used: at least one, never more than there are candidates.
    pub fn effective_workers(&self, requested: usize) -> usize {
        let len = usize::try_from(self.len()).unwrap_or(usize::MAX);
        requested.min(len).max(1)
    }
}

/// A contiguous slice of the search range owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub worker_id: usize,
    /// First candidate (inclusive).
    pub start: i64,
    /// One past the last candidate.
    pub end: i64,
}

impl Chunk {
    pub fn len(&self) -> u64 {
        (self.end - self.start) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Candidates in ascending order.
    pub fn candidates(&self) -> Range<i64> {
        self.start..self.end
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Split `range` into exactly `workers` contiguous chunks.
///
/// Chunk sizes differ by at most one; the first `len % workers` chunks take the extra
/// element. When there are more workers than candidates the surplus chunks are empty.
/// A worker count of zero is treated as one.
pub fn partition(range: SearchRange, workers: usize) -> Vec<Chunk> {
    let workers = workers.max(1);
    let len = range.len();
    let base = len / workers as u64;
    let extra = len % workers as u64;

    let mut chunks = Vec::with_capacity(workers);
    let mut start = LOW;
    for worker_id in 0..workers {
        let size = base + u64::from((worker_id as u64) < extra);
        let end = start + size as i64;
        chunks.push(Chunk {
            worker_id,
            start,
            end,
        });
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(range: SearchRange, chunks: &[Chunk]) {
        let mut expected = LOW;
        for chunk in chunks {
            assert_eq!(chunk.start, expected, "gap or overlap before {}", chunk);
            assert!(chunk.end >= chunk.start);
            expected = chunk.end;
        }
        let covered: u64 = chunks.iter().map(Chunk::len).sum();
        assert_eq!(covered, range.len());
    }

    #[test]
    fn test_search_range_len() {
        assert_eq!(SearchRange::new(i64::MIN).len(), 0);
        assert_eq!(SearchRange::new(-5).len(), 0);
        assert_eq!(SearchRange::new(0).len(), 0);
        assert_eq!(SearchRange::new(2).len(), 0);
        assert_eq!(SearchRange::new(3).len(), 1);
        assert_eq!(SearchRange::new(20).len(), 18);
        assert_eq!(SearchRange::new(i64::MAX).len(), (i64::MAX - 2) as u64);
        assert!(SearchRange::new(2).is_empty());
    }

    #[test]
    fn test_effective_workers() {
        assert_eq!(SearchRange::new(20).effective_workers(4), 4);
        assert_eq!(SearchRange::new(20).effective_workers(100), 18);
        assert_eq!(SearchRange::new(2).effective_workers(8), 1);
        assert_eq!(SearchRange::new(-5).effective_workers(1), 1);
    }

    #[test]
    fn test_partition_balanced() {
        let range = SearchRange::new(20);
        let chunks = partition(range, 4);

        assert_eq!(chunks.len(), 4);
        assert_exact_cover(range, &chunks);
        let sizes: Vec<u64> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(sizes, vec![5, 5, 4, 4]);
        assert_eq!(chunks[0].candidates(), 2..7);
        assert_eq!(chunks[3].candidates(), 16..20);
    }

    #[test]
    fn test_partition_completeness() {
        for high in [-3, 0, 2, 3, 4, 17, 100, 1_001] {
            for workers in [1, 2, 3, 7, 8, 100] {
                let range = SearchRange::new(high);
                let chunks = partition(range, workers);
                assert_eq!(chunks.len(), workers);
                assert_exact_cover(range, &chunks);

                let max = chunks.iter().map(Chunk::len).max().unwrap_or(0);
                let min = chunks.iter().map(Chunk::len).min().unwrap_or(0);
                assert!(max - min <= 1, "unbalanced for ({}, {})", high, workers);
            }
        }
    }

    #[test]
    fn test_surplus_workers_get_empty_chunks() {
        let chunks = partition(SearchRange::new(5), 6);
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks.iter().filter(|c| c.is_empty()).count(), 3);
        assert!(chunks[3..].iter().all(|c| c.start == 5 && c.end == 5));
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let chunks = partition(SearchRange::new(10), 0);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].candidates(), 2..10);
    }

    #[test]
    fn test_worker_ids_are_sequential() {
        let chunks = partition(SearchRange::new(50), 5);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.worker_id, i);
        }
        assert_eq!(chunks[2].to_string(), "[22, 32)");
    }
}
