//! Aggregation policies
//!
//! Each policy folds pages into a running result. The driver owns the
//! aggregator for the duration of a run and returns it inside the outcome.

use crate::error::Result;
use crate::types::{JsonValue, PageResult};

/// Folds pages into a result
pub trait Aggregator {
    /// Merge one page. An error aborts the run.
    fn add_page(&mut self, page: &PageResult) -> Result<()>;
}

// ============================================================================
// Counts
// ============================================================================

/// Sums `totalCount` across pages.
///
/// Pages without a `totalCount`, such as error payloads, contribute zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountsAggregator {
    total: u64,
}

impl CountsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Aggregator for CountsAggregator {
    fn add_page(&mut self, page: &PageResult) -> Result<()> {
        self.total = self.total.saturating_add(page.total_count().unwrap_or(0));
        Ok(())
    }
}

// ============================================================================
// Concat
// ============================================================================

/// Concatenates every page's `results` array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcatAggregator {
    results: Vec<JsonValue>,
}

impl ConcatAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[JsonValue] {
        &self.results
    }

    pub fn into_results(self) -> Vec<JsonValue> {
        self.results
    }
}

impl Aggregator for ConcatAggregator {
    fn add_page(&mut self, page: &PageResult) -> Result<()> {
        if let Some(results) = page.results() {
            self.results.extend(results.iter().cloned());
        }
        Ok(())
    }
}

// ============================================================================
// Emit
// ============================================================================

/// Hands each page to a callback as it arrives, keeping nothing
pub struct EmitAggregator<F>
where
    F: FnMut(&PageResult) -> Result<()>,
{
    emit: F,
    emitted: u32,
}

impl<F> EmitAggregator<F>
where
    F: FnMut(&PageResult) -> Result<()>,
{
    pub fn new(emit: F) -> Self {
        Self { emit, emitted: 0 }
    }

    /// Pages passed to the callback
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl<F> Aggregator for EmitAggregator<F>
where
    F: FnMut(&PageResult) -> Result<()>,
{
    fn add_page(&mut self, page: &PageResult) -> Result<()> {
        (self.emit)(page)?;
        self.emitted += 1;
        Ok(())
    }
}

impl<F> std::fmt::Debug for EmitAggregator<F>
where
    F: FnMut(&PageResult) -> Result<()>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitAggregator")
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

/// Runs two aggregators over the same pages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Both<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Both<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Aggregator, B: Aggregator> Aggregator for Both<A, B> {
    fn add_page(&mut self, page: &PageResult) -> Result<()> {
        self.first.add_page(page)?;
        self.second.add_page(page)
    }
}
