//! Per-item outcomes of a batch operation.

use crate::registry::types::PoolError;

/// Outcome for a single source within a batch.
#[derive(Debug)]
pub struct SpecOutcome {
    /// Source name as it was reported (configured name on create,
    /// normalized name on close).
    pub source: String,
    pub result: Result<(), PoolError>,
}

impl SpecOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Collected outcomes of `create_all` or `close_all`, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<SpecOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: impl Into<String>, result: Result<(), PoolError>) {
        self.outcomes.push(SpecOutcome {
            source: source.into(),
            result,
        });
    }

    pub fn outcomes(&self) -> &[SpecOutcome] {
        &self.outcomes
    }

    /// Names of the sources that succeeded.
    pub fn succeeded(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.source.as_str())
            .collect()
    }

    /// Sources that failed, with their error.
    pub fn failed(&self) -> Vec<(&str, &PoolError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.source.as_str(), e)))
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// True when every item succeeded (an empty batch is clean).
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
