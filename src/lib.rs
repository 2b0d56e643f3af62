// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # gnip-cli
//!
//! Client for the Twitter enterprise data APIs: Search (30-day and
//! Full-Archive), Engagement, PowerTrack rules and stream, and Historical
//! PowerTrack jobs.
//!
//! Every request-response command runs through the same pipeline: a
//! request body is built from options, sent by a [`http::Transport`], and
//! re-sent with the returned `next` token until the API stops returning one.
//!
//! ```rust,ignore
//! use gnip_cli::http::{HttpClient, HttpTransport};
//! use gnip_cli::pagination::{CountsAggregator, PaginationConfig, PaginationDriver};
//!
//! let transport = HttpTransport::new(client, Method::POST, counts_url, auth);
//! let outcome = PaginationDriver::new(PaginationConfig::follow())
//!     .run(&transport, &request, CountsAggregator::new())
//!     .await?;
//! println!("Total count: {}", outcome.aggregate.total());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CLI (clap)                            │
//! │  search   engagement   rules   stream   historical           │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬────────────┬───┴─────────┬────────────┬──────────┐
//! │  Request  │ Transport  │ Pagination  │  Reporter  │  Stream  │
//! ├───────────┼────────────┼─────────────┼────────────┼──────────┤
//! │ Search    │ Basic      │ next token  │ Status     │ Lines    │
//! │ Engagement│ OAuth 1.0a │ Loop guard  │ Pretty     │ Backoff  │
//! │ Rules/Jobs│ Bearer     │ Aggregators │ Summary    │ Stall    │
//! └───────────┴────────────┴─────────────┴────────────┴──────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and exit codes
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and account settings
pub mod config;

/// Authentication implementations
pub mod auth;

/// API hosts and URL templates
pub mod endpoints;

/// Request body builders
pub mod request;

/// HTTP client, rate limiting and the transport seam
pub mod http;

/// Pagination driver and aggregators
pub mod pagination;

/// Result reporting and Tweet parsing
pub mod output;

/// PowerTrack stream consumer
pub mod stream;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, EXIT_FAILURE, EXIT_TRANSPORT};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
