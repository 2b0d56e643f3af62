//! Request builder module
//!
//! Turns command options into JSON request bodies for every API family.
//!
//! # Overview
//!
//! Builders are pure functions with no I/O, except [`RequestSpec::from_file`]
//! which loads a request body that overrides CLI options entirely.
//! [`build`] derives the request for a later page by injecting the
//! continuation token into a copy of the base spec.

mod builders;
mod types;

pub use builders::{
    add_rule_request, build, delete_rules_request, engagement_request, job_decision_request,
    job_uuid_from_data_url, job_uuid_from_job_url, max_tweet_ids, search_request,
    DEFAULT_ENGAGEMENT_TYPES, MAX_QUERY_LEN, MAX_RESULTS_RANGE, OWNED_TOTALS_TYPES,
    UNOWNED_TOTALS_TYPES,
};
pub use types::{EngagementOptions, JobDecision, RequestSpec, SearchOptions, NEXT_KEY};

#[cfg(test)]
mod tests;
