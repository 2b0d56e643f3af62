//! Pagination module
//!
//! The Paginated Request Runner shared by the Search and Engagement clients.
//!
//! # Overview
//!
//! [`PaginationDriver`] sends the base request, merges the page into an
//! [`Aggregator`], and while the response carries a `next` token (and
//! pagination was requested) sends the base request again with that token.
//! A repeated token or the page ceiling ends the run with
//! [`crate::Error::InfiniteLoopDetected`].

mod aggregate;
mod driver;
mod types;

pub use aggregate::{Aggregator, Both, ConcatAggregator, CountsAggregator, EmitAggregator};
pub use driver::PaginationDriver;
pub use types::{
    DriverState, NextPage, PaginationConfig, PaginationOutcome, PaginationState,
    DEFAULT_MAX_PAGES,
};

#[cfg(test)]
mod tests;
