//! Pagination types
//!
//! Configuration, loop state and the outcome handed back by the driver.

use crate::error::{Error, Result};
use crate::types::{ContinuationToken, PageResult};
use std::collections::HashSet;

/// Default ceiling on pages fetched in one run
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

/// Configuration for pagination behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Follow `next` tokens; when false exactly one page is fetched
    pub paginate: bool,
    /// Hard ceiling on pages, reached only by a misbehaving server
    pub max_pages: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            paginate: false,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PaginationConfig {
    /// Single-page configuration
    pub fn single() -> Self {
        Self::default()
    }

    /// Follow `next` until the server stops returning it
    pub fn follow() -> Self {
        Self {
            paginate: true,
            ..Self::default()
        }
    }

    /// Set the page ceiling
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// Driver loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Running,
    Done,
}

/// What to do after a page has been merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch another page with this token
    Continue(ContinuationToken),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Every token already followed
    seen: HashSet<ContinuationToken>,
    /// Current state
    pub state: DriverState,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a page was received
    pub fn record_page(&mut self) {
        self.pages += 1;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.state = DriverState::Done;
    }

    pub fn is_done(&self) -> bool {
        self.state == DriverState::Done
    }

    /// Decide the next step from the page just received.
    ///
    /// Fails when the token was already followed or the page ceiling is
    /// reached, which would otherwise loop forever.
    pub fn next(&mut self, page: &PageResult, config: &PaginationConfig) -> Result<NextPage> {
        let Some(token) = page.next_token() else {
            self.mark_done();
            return Ok(NextPage::Done);
        };

        if !config.paginate {
            self.mark_done();
            return Ok(NextPage::Done);
        }

        if self.seen.contains(&token) {
            return Err(Error::infinite_loop(
                format!("continuation token '{token}' repeated"),
                self.pages,
            ));
        }

        if self.pages >= config.max_pages {
            return Err(Error::infinite_loop(
                format!("page limit of {} reached", config.max_pages),
                self.pages,
            ));
        }

        self.seen.insert(token.clone());
        Ok(NextPage::Continue(token))
    }
}

/// Result of a completed pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOutcome<A> {
    /// The finalized aggregate
    pub aggregate: A,
    /// Number of pages fetched, which equals transport calls made
    pub pages: u32,
    /// HTTP status of the page that ended the run
    pub last_status: u16,
}

impl<A> PaginationOutcome<A> {
    /// False when the run ended on an error page, so the aggregate only
    /// covers the pages before it
    pub fn is_complete(&self) -> bool {
        (200..300).contains(&self.last_status)
    }
}
