//! Per-run outcome counters.

#[cfg(test)]
#[path = "tally_tests.rs"]
mod tests;

/// Result of a batch run over many repositories.
///
/// Items are independent, so a batch is counted rather than aborted when one
/// item fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTally {
    /// Number of items that reached their target state
    pub successful: usize,

    /// Number of items that failed
    pub failed: usize,

    /// Number of items left alone because they are protected (the template repository)
    pub skipped: usize,

    /// Names of the failed items, in processing order
    pub failed_items: Vec<String>,
}

impl BatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, item: impl Into<String>) {
        self.failed += 1;
        self.failed_items.push(item.into());
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Number of items processed, skipped items excluded.
    pub fn processed(&self) -> usize {
        self.successful + self.failed
    }

    /// A run succeeds when at least one item succeeded.
    pub fn is_success(&self) -> bool {
        self.successful > 0
    }
}
