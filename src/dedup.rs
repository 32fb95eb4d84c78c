//! Candidate deduplication
//!
//! Merges one or more candidate streams into a unique, sorted result set.

use ahash::RandomState;
use hashbrown::HashSet;

/// Statistics for deduplication operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Total items processed
    pub total_processed: u64,
    /// Unique items found
    pub unique_count: u64,
    /// Duplicate items found
    pub duplicate_count: u64,
}

/// In-memory HashSet-based deduplicator
pub struct Deduplicator {
    set: HashSet<String, RandomState>,
    stats: DedupStats,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the set, capped so a huge estimate does not allocate up front
    pub fn with_capacity(capacity: usize) -> Self {
        const MAX_PREALLOC: usize = 1 << 20;
        Self {
            set: HashSet::with_capacity_and_hasher(capacity.min(MAX_PREALLOC), RandomState::new()),
            stats: DedupStats::default(),
        }
    }

    /// Add a candidate, returning true if it was not seen before
    pub fn insert(&mut self, item: String) -> bool {
        self.stats.total_processed += 1;
        if self.set.insert(item) {
            self.stats.unique_count += 1;
            true
        } else {
            self.stats.duplicate_count += 1;
            false
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.set.contains(item)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    /// Consume the set into its final, lexicographically sorted form
    pub fn finish(self) -> ResultSet {
        let mut candidates: Vec<String> = self.set.into_iter().collect();
        candidates.sort_unstable();
        ResultSet {
            candidates,
            stats: self.stats,
        }
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<String> for Deduplicator {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

/// Unique, sorted candidates produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    candidates: Vec<String>,
    stats: DedupStats,
}

impl ResultSet {
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    pub fn into_candidates(self) -> Vec<String> {
        self.candidates
    }
}

/// Deduplicate any candidate stream in one call
pub fn dedup_sorted<I>(candidates: I) -> ResultSet
where
    I: IntoIterator<Item = String>,
{
    let mut dedup = Deduplicator::new();
    dedup.extend(candidates);
    dedup.finish()
}
