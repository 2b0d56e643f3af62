//! Pagination driver
//!
//! Repeatedly sends a request through a [`Transport`], feeding each page to
//! an [`Aggregator`] and following the `next` token until it disappears.

use super::aggregate::Aggregator;
use super::types::{NextPage, PaginationConfig, PaginationOutcome, PaginationState};
use crate::error::Result;
use crate::http::Transport;
use crate::request::{self, RequestSpec};
use tracing::{debug, info, warn};

/// Drives a paginated request to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationDriver {
    config: PaginationConfig,
}

impl PaginationDriver {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Run until DONE.
    ///
    /// Pages are strictly sequential. A transport error is returned as-is
    /// and the partial aggregate is dropped with it.
    pub async fn run<T, A>(
        &self,
        transport: &T,
        base: &RequestSpec,
        mut aggregator: A,
    ) -> Result<PaginationOutcome<A>>
    where
        T: Transport + ?Sized,
        A: Aggregator,
    {
        let mut state = PaginationState::new();
        let mut current = request::build(base, None);
        let mut last_status = 0;

        while !state.is_done() {
            debug!(page = state.pages + 1, "Requesting page");
            let page = transport.send(&current).await?;
            state.record_page();
            last_status = page.status;
            aggregator.add_page(&page)?;

            match state.next(&page, &self.config)? {
                NextPage::Continue(token) => {
                    debug!(page = state.pages, next = %token, "Following continuation token");
                    current = request::build(base, Some(&token));
                }
                NextPage::Done => {}
            }
        }

        if (200..300).contains(&last_status) {
            info!(pages = state.pages, "Pagination complete");
        } else {
            warn!(
                pages = state.pages,
                status = last_status,
                "Pagination ended on an error response"
            );
        }
        Ok(PaginationOutcome {
            aggregate: aggregator,
            pages: state.pages,
            last_status,
        })
    }
}
