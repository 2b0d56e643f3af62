//! Output module
//!
//! Handles everything written to stdout, plus the decoded Historical
//! PowerTrack data files written to disk.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Formatting responses (raw passthrough or sorted, indented JSON)
//! - Status lines and pagination summaries
//! - Projecting Tweets onto selected fields and classifying them by type
//! - Decoding gzipped data files and writing them without leaving partial files

mod data_files;
mod reporter;
mod tweets;

pub use data_files::{decode_data_file, partial_path, write_json_file};
pub use reporter::{format, sort_keys, to_pretty_json, Reporter};
pub use tweets::{
    parsed_results, select_fields, select_results, ParsedTweet, TweetType, STATUS_URL_PREFIX,
};
