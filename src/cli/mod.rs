//! CLI module
//!
//! Command-line interface for the enterprise data APIs.
//!
//! # Commands
//!
//! - `search` - Search Tweets or counts, optionally following `next`
//! - `engagement` - Engagement API totals, 28hr and historical metrics
//! - `rules` - List, add and delete PowerTrack rules
//! - `stream` - Consume the PowerTrack stream with reconnects
//! - `historical` - Create, inspect and download Historical PowerTrack jobs

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, EngagementCommand, HistoricalCommand, RulesCommand, SearchArgs, StreamArgs,
};
pub use runner::{download_file_name, Runner};
