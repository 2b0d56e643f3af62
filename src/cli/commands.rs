//! CLI commands and argument parsing

use crate::pagination::DEFAULT_MAX_PAGES;
use crate::types::Bucket;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the Twitter enterprise data APIs
#[derive(Parser, Debug)]
#[command(name = "gnip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pretty print JSON responses (sorted keys, 2-space indent).
    /// Always on for engagement, rules and historical unless `--raw`
    #[arg(short, long, global = true)]
    pub pretty_print: bool,

    /// Print engagement, rules and historical responses as received
    #[arg(long, global = true, conflicts_with = "pretty_print")]
    pub raw: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load credentials from this file instead of `./.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Send every request to this base URL instead of the production hosts
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Maximum requests per second
    #[arg(long, global = true)]
    pub rate_limit: Option<u32>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether responses are pretty printed.
    ///
    /// Search and stream output is raw unless `-p` is given; every other
    /// command pretty prints unless `--raw` is given.
    pub fn pretty(&self) -> bool {
        match self.command {
            Commands::Search(_) | Commands::Stream(_) => self.pretty_print,
            _ => !self.raw,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search Tweets (30-day or Full-Archive) or their counts
    Search(SearchArgs),

    /// Engagement API metrics
    Engagement {
        #[command(subcommand)]
        command: EngagementCommand,
    },

    /// Manage PowerTrack rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Consume the PowerTrack stream
    Stream(StreamArgs),

    /// Historical PowerTrack jobs
    Historical {
        #[command(subcommand)]
        command: HistoricalCommand,
    },
}

/// Options for `search`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// A valid query up to 2,048 characters
    #[arg(short, long)]
    pub query: Option<String>,

    /// Oldest date from which results will be provided (YYYYMMDDhhmm)
    #[arg(short, long)]
    pub from_date: Option<String>,

    /// Most recent date to which results will be provided (YYYYMMDDhhmm)
    #[arg(short, long)]
    pub to_date: Option<String>,

    /// Results per response (10-500)
    #[arg(short, long)]
    pub max_results: Option<u32>,

    /// Unit of time for counts
    #[arg(short, long, value_enum)]
    pub bucket: Option<Bucket>,

    /// Request the counts endpoint
    #[arg(short, long)]
    pub counts: bool,

    /// Follow `next` tokens until the results are exhausted
    #[arg(short, long = "next")]
    pub next: bool,

    /// Page ceiling when following `next`
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Use a JSON file for the request body, ignoring query options
    #[arg(short, long)]
    pub request_file: bool,

    /// Request body file used with `--request-file`
    #[arg(long, default_value = "request.json")]
    pub request_path: PathBuf,

    /// Root-level Tweet fields to print (e.g. id_str text favorite_count)
    #[arg(short, long, num_args = 1..)]
    pub object_selector: Option<Vec<String>>,

    /// Add each Tweet's type to selected fields
    #[arg(short, long)]
    pub determine_tweet_type: bool,

    /// Print a parsed summary (id, text, type, link) of each Tweet
    #[arg(long)]
    pub summary: bool,

    /// Concatenate results across pages and print them once at the end
    #[arg(long, conflicts_with_all = ["counts", "summary", "object_selector"])]
    pub collect: bool,
}

/// Engagement API endpoints
#[derive(Subcommand, Debug, Clone)]
pub enum EngagementCommand {
    /// Lifetime totals (up to 250 Tweets)
    Totals {
        /// One or more Tweet IDs
        #[arg(short, long, num_args = 1.., required = true)]
        tweet_ids: Vec<String>,

        /// Overrides default metrics
        #[arg(short, long, num_args = 1..)]
        metrics: Option<Vec<String>>,

        /// Request owned-Tweet metrics with user context auth
        #[arg(short, long)]
        owned: bool,
    },

    /// Metrics for the last 28 hours (up to 25 Tweets)
    #[command(name = "28hr")]
    TwentyEightHour {
        /// One or more Tweet IDs
        #[arg(short, long, num_args = 1.., required = true)]
        tweet_ids: Vec<String>,

        /// Overrides default metrics
        #[arg(short, long, num_args = 1..)]
        metrics: Option<Vec<String>>,
    },

    /// Metrics for a date range (up to 25 Tweets)
    Historical {
        /// One or more Tweet IDs
        #[arg(short, long, num_args = 1.., required = true)]
        tweet_ids: Vec<String>,

        /// Overrides default metrics
        #[arg(short, long, num_args = 1..)]
        metrics: Option<Vec<String>>,

        /// Start of the range, e.g. 2019-01-01T12:00:00Z
        #[arg(short, long)]
        start_date: Option<String>,

        /// End of the range
        #[arg(short, long)]
        end_date: Option<String>,
    },
}

/// PowerTrack rule operations
#[derive(Subcommand, Debug, Clone)]
pub enum RulesCommand {
    /// List the rules on the stream
    List,

    /// Add a rule
    Add {
        /// Rule value
        #[arg(short, long)]
        rule_value: String,

        /// Optional tag returned with matching activities
        #[arg(long)]
        tag: Option<String>,
    },

    /// Delete rules by ID
    Delete {
        /// One or more rule IDs
        #[arg(short, long, num_args = 1.., required = true)]
        ids: Vec<String>,
    },
}

/// Options for `stream`
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Stop after this many reconnects (default: reconnect forever)
    #[arg(long)]
    pub max_reconnects: Option<u32>,

    /// Upper bound on the reconnect delay, in seconds
    #[arg(long, default_value = "320")]
    pub max_backoff: u64,
}

/// Historical PowerTrack job operations
#[derive(Subcommand, Debug, Clone)]
pub enum HistoricalCommand {
    /// Create a job from a JSON job file
    Create {
        #[arg(long, default_value = "historical_job.json")]
        job_file: PathBuf,
    },

    /// List jobs on the account
    List,

    /// Show a job's status
    Status {
        /// `jobURL` returned when the job was created
        #[arg(short, long)]
        job_url: String,
    },

    /// Accept a quoted job
    Accept {
        #[arg(short, long)]
        job_url: String,
    },

    /// Reject a quoted job
    Reject {
        #[arg(short, long)]
        job_url: String,
    },

    /// Show the results manifest of a completed job
    Results {
        /// `dataURL` of a completed job (ends in /results.json)
        #[arg(short, long)]
        data_url: String,
    },

    /// Download every data file of a completed job
    Download {
        #[arg(short, long)]
        data_url: String,

        /// Destination directory
        #[arg(long, default_value = "downloads")]
        out: PathBuf,
    },
}
