//! CLI runner - executes commands

use crate::auth::{AuthConfig, Authenticator};
use crate::cli::commands::{
    Cli, Commands, EngagementCommand, HistoricalCommand, RulesCommand, SearchArgs, StreamArgs,
};
use crate::config::Settings;
use crate::endpoints::Endpoints;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, HttpTransport, RateLimiterConfig, Transport};
use crate::output::{
    decode_data_file, parsed_results, select_results, write_json_file, Reporter,
};
use crate::pagination::{
    Both, ConcatAggregator, CountsAggregator, EmitAggregator, PaginationConfig, PaginationDriver,
};
use crate::request::{self, EngagementOptions, JobDecision, RequestSpec, SearchOptions};
use crate::stream::{ReconnectConfig, StreamConsumer, WriterSink};
use crate::types::{BackoffType, EngagementKind, JsonValue, Method, PageResult, SearchKind};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
    settings: Settings,
    endpoints: Endpoints,
    client: HttpClient,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli, settings: Settings) -> Result<Self> {
        let mut config = HttpClientConfig::builder().timeout(Duration::from_secs(cli.timeout));
        // Search is paced to its per-minute quota unless a rate is given
        let rate_limit = match (cli.rate_limit, &cli.command) {
            (Some(rps), _) => Some(RateLimiterConfig::per_second(rps)),
            (None, Commands::Search(_)) => Some(RateLimiterConfig::default()),
            (None, _) => None,
        };
        if let Some(limit) = rate_limit {
            config = config.rate_limit(limit);
        }
        let client = HttpClient::with_config(config.build())?;

        let endpoints = match &cli.base_url {
            Some(base) => Endpoints::with_base_url(base),
            None => Endpoints::new(),
        };

        Ok(Self {
            cli,
            settings,
            endpoints,
            client,
        })
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        self.run_with(std::io::stdout()).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_with<W: Write>(&self, out: W) -> Result<()> {
        let pretty = self.cli.pretty();

        if let Commands::Stream(args) = &self.cli.command {
            return self.stream(args, WriterSink::new(out, pretty)).await;
        }

        let mut reporter = Reporter::new(out, pretty);
        match &self.cli.command {
            Commands::Search(args) => self.search(args, &mut reporter).await?,
            Commands::Engagement { command } => self.engagement(command, &mut reporter).await?,
            Commands::Rules { command } => self.rules(command, &mut reporter).await?,
            Commands::Historical { command } => self.historical(command, &mut reporter).await?,
            Commands::Stream(_) => {}
        }
        reporter.flush()
    }

    // ========================================================================
    // Search
    // ========================================================================

    async fn search<W: Write>(&self, args: &SearchArgs, reporter: &mut Reporter<W>) -> Result<()> {
        let kind = if args.counts {
            SearchKind::Counts
        } else {
            SearchKind::Data
        };
        let url = self.endpoints.search(
            self.settings.search_archive()?,
            self.settings.account_name()?,
            self.settings.search_label()?,
            kind,
        )?;
        let transport = self.transport(Method::POST, url, self.settings.basic_auth()?);

        // A request file replaces the query options entirely
        let base = if args.request_file {
            debug!("Using request body from {}", args.request_path.display());
            RequestSpec::from_file(&args.request_path)?
        } else {
            request::search_request(&SearchOptions {
                query: args.query.clone(),
                from_date: args.from_date.clone(),
                to_date: args.to_date.clone(),
                max_results: args.max_results,
                bucket: args.bucket,
            })?
        };

        let driver = PaginationDriver::new(PaginationConfig {
            paginate: args.next,
            ..PaginationConfig::default()
        }
        .max_pages(args.max_pages));

        if args.counts {
            let (pages, last_status, total) = {
                let emit = EmitAggregator::new(|page: &PageResult| reporter.response(page));
                let outcome = driver
                    .run(&transport, &base, Both::new(CountsAggregator::new(), emit))
                    .await?;
                (outcome.pages, outcome.last_status, outcome.aggregate.first.total())
            };
            return finish(reporter, pages, last_status, Some(total));
        }

        if args.collect {
            let (pages, last_status, results) = {
                // Only error responses are printed as they arrive
                let errors = EmitAggregator::new(|page: &PageResult| {
                    if page.is_success() {
                        Ok(())
                    } else {
                        reporter.response(page)
                    }
                });
                let outcome = driver
                    .run(&transport, &base, Both::new(ConcatAggregator::new(), errors))
                    .await?;
                (
                    outcome.pages,
                    outcome.last_status,
                    outcome.aggregate.first.into_results(),
                )
            };
            reporter.json(&json!({ "results": results }))?;
            return finish(reporter, pages, last_status, None);
        }

        let selector = args.object_selector.as_deref().filter(|keys| !keys.is_empty());
        let (pages, last_status) = {
            let emit = EmitAggregator::new(|page: &PageResult| {
                let results = page.results().map(Vec::as_slice);
                match (results, args.summary, selector) {
                    (Some(results), true, _) => reporter.json(&parsed_results(results)),
                    (Some(results), false, Some(keys)) => {
                        reporter.json(&select_results(results, keys, args.determine_tweet_type))
                    }
                    // Error payloads have no results and are shown as received
                    _ => reporter.response(page),
                }
            });
            let outcome = driver.run(&transport, &base, emit).await?;
            (outcome.pages, outcome.last_status)
        };
        finish(reporter, pages, last_status, None)
    }

    // ========================================================================
    // Engagement
    // ========================================================================

    async fn engagement<W: Write>(
        &self,
        command: &EngagementCommand,
        reporter: &mut Reporter<W>,
    ) -> Result<()> {
        let (kind, options, auth) = match command {
            EngagementCommand::Totals {
                tweet_ids,
                metrics,
                owned,
            } => {
                // Public metrics work with app-only auth; owned metrics need user context
                let auth = if *owned {
                    self.settings.oauth1_auth()?
                } else {
                    self.settings.bearer_auth()?
                };
                let options = EngagementOptions {
                    tweet_ids: tweet_ids.clone(),
                    metrics: metrics.clone(),
                    owned: *owned,
                    ..Default::default()
                };
                (EngagementKind::Totals, options, auth)
            }
            EngagementCommand::TwentyEightHour { tweet_ids, metrics } => {
                let options = EngagementOptions {
                    tweet_ids: tweet_ids.clone(),
                    metrics: metrics.clone(),
                    ..Default::default()
                };
                (
                    EngagementKind::TwentyEightHour,
                    options,
                    self.settings.oauth1_auth()?,
                )
            }
            EngagementCommand::Historical {
                tweet_ids,
                metrics,
                start_date,
                end_date,
            } => {
                let options = EngagementOptions {
                    tweet_ids: tweet_ids.clone(),
                    metrics: metrics.clone(),
                    start_date: start_date.clone(),
                    end_date: end_date.clone(),
                    ..Default::default()
                };
                (
                    EngagementKind::Historical,
                    options,
                    self.settings.oauth1_auth()?,
                )
            }
        };

        let spec = request::engagement_request(kind, &options)?;
        let transport = self.transport(Method::POST, self.endpoints.engagement(kind)?, auth);

        // Engagement responses carry no `next`; the driver still owns the call
        let emit = EmitAggregator::new(|page: &PageResult| reporter.response(page));
        PaginationDriver::new(PaginationConfig::single())
            .run(&transport, &spec, emit)
            .await?;
        Ok(())
    }

    // ========================================================================
    // PowerTrack rules
    // ========================================================================

    async fn rules<W: Write>(
        &self,
        command: &RulesCommand,
        reporter: &mut Reporter<W>,
    ) -> Result<()> {
        let account = self.settings.account_name()?;
        let label = self.settings.powertrack_label()?;
        let auth = self.settings.basic_auth()?;

        let page = match command {
            RulesCommand::List => {
                let url = self.endpoints.rules(account, label)?;
                self.send_once(Method::GET, url, auth, &RequestSpec::default())
                    .await?
            }
            RulesCommand::Add { rule_value, tag } => {
                let spec = request::add_rule_request(rule_value, tag.as_deref())?;
                let url = self.endpoints.rules(account, label)?;
                self.send_once(Method::POST, url, auth, &spec).await?
            }
            RulesCommand::Delete { ids } => {
                let spec = request::delete_rules_request(ids)?;
                let url = self.endpoints.rules_delete(account, label)?;
                self.send_once(Method::POST, url, auth, &spec).await?
            }
        };
        reporter.response(&page)
    }

    // ========================================================================
    // PowerTrack stream
    // ========================================================================

    async fn stream<W: Write>(&self, args: &StreamArgs, sink: WriterSink<W>) -> Result<()> {
        let url = self.endpoints.stream(
            self.settings.account_name()?,
            self.settings.powertrack_label()?,
        )?;
        let auth = Authenticator::new(self.settings.basic_auth()?);
        let config = ReconnectConfig::default()
            .max_reconnects(args.max_reconnects)
            .backoff(
                BackoffType::Exponential,
                Duration::from_secs(1),
                Duration::from_secs(args.max_backoff.max(1)),
            );

        let summary = StreamConsumer::new(self.client.clone(), url, auth, config)
            .run(sink)
            .await?;
        info!(
            connections = summary.connections,
            events = summary.events,
            "Stream finished"
        );
        Ok(())
    }

    // ========================================================================
    // Historical PowerTrack
    // ========================================================================

    async fn historical<W: Write>(
        &self,
        command: &HistoricalCommand,
        reporter: &mut Reporter<W>,
    ) -> Result<()> {
        let auth = self.settings.basic_auth()?;

        let page = match command {
            HistoricalCommand::Create { job_file } => {
                let spec = RequestSpec::from_file(job_file)?;
                let url = self.endpoints.historical_jobs(self.settings.account_name()?)?;
                info!("Creating Historical PowerTrack job...");
                self.send_once(Method::POST, url, auth, &spec).await?
            }
            HistoricalCommand::List => {
                let account = self.settings.account_name()?;
                let url = self.endpoints.historical_jobs(account)?;
                info!("Retrieving jobs under account '{}'", account);
                self.send_once(Method::GET, url, auth, &RequestSpec::default())
                    .await?
            }
            HistoricalCommand::Status { job_url } => {
                let url = Url::parse(job_url)?;
                info!(
                    "Checking the status of job {}",
                    request::job_uuid_from_job_url(job_url).unwrap_or(job_url)
                );
                self.send_once(Method::GET, url, auth, &RequestSpec::default())
                    .await?
            }
            HistoricalCommand::Accept { job_url } => {
                self.decide(job_url, JobDecision::Accept, auth).await?
            }
            HistoricalCommand::Reject { job_url } => {
                self.decide(job_url, JobDecision::Reject, auth).await?
            }
            HistoricalCommand::Results { data_url } => {
                let url = Url::parse(data_url)?;
                info!(
                    "Retrieving results for job {}",
                    request::job_uuid_from_data_url(data_url).unwrap_or(data_url)
                );
                self.send_once(Method::GET, url, auth, &RequestSpec::default())
                    .await?
            }
            HistoricalCommand::Download { data_url, out } => {
                return self.download(data_url, out, auth, reporter).await;
            }
        };
        reporter.response(&page)
    }

    async fn decide(
        &self,
        job_url: &str,
        decision: JobDecision,
        auth: AuthConfig,
    ) -> Result<PageResult> {
        let url = Url::parse(job_url)?;
        info!(
            "Requesting '{}' for job {}",
            decision.as_str(),
            request::job_uuid_from_job_url(job_url).unwrap_or(job_url)
        );
        let spec = request::job_decision_request(decision);
        self.send_once(Method::PUT, url, auth, &spec).await
    }

    /// Fetch the results manifest and save every listed file not already
    /// present in `out`
    async fn download<W: Write>(
        &self,
        data_url: &str,
        out: &Path,
        auth: AuthConfig,
        reporter: &mut Reporter<W>,
    ) -> Result<()> {
        let job_uuid = request::job_uuid_from_data_url(data_url).ok_or_else(|| {
            Error::invalid_value("data_url", "expected a URL ending in <job uuid>/results.json")
        })?;

        let manifest = self
            .send_once(Method::GET, Url::parse(data_url)?, auth, &RequestSpec::default())
            .await?;
        if !manifest.is_success() {
            return Err(Error::http_status(manifest.status, manifest.body));
        }
        let urls = url_list(&manifest)?;

        std::fs::create_dir_all(out)
            .with_context(|| format!("Failed to create {}", out.display()))?;
        let total = urls.len();
        let mut downloaded = 0usize;

        for (i, link) in urls.iter().enumerate() {
            let name = download_file_name(link, job_uuid).ok_or_else(|| {
                Error::manifest(format!("cannot derive a file name from {link}"))
            })?;
            let path = out.join(&name);
            if path.exists() {
                debug!("Skipping {}, already downloaded", path.display());
                continue;
            }

            reporter.line(&format!("Downloading file {}/{}...", i + 1, total))?;
            let bytes = self.client.fetch_bytes(&Url::parse(link)?).await?;
            let activities = decode_data_file(&bytes)
                .with_context(|| format!("Failed to decode {name}"))?;
            write_json_file(&path, &activities)?;
            debug!(activities = activities.len(), "Saved {}", path.display());
            downloaded += 1;
        }

        reporter.line(&format!(
            "Downloaded {downloaded} of {total} files to {}",
            out.display()
        ))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn transport(&self, method: Method, url: Url, auth: AuthConfig) -> HttpTransport {
        HttpTransport::new(self.client.clone(), method, url, Authenticator::new(auth))
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        auth: AuthConfig,
        spec: &RequestSpec,
    ) -> Result<PageResult> {
        self.transport(method, url, auth).send(spec).await
    }
}

/// Summary for a finished run, or the incomplete marker when the last
/// response was an error
fn finish<W: Write>(
    reporter: &mut Reporter<W>,
    pages: u32,
    last_status: u16,
    total_count: Option<u64>,
) -> Result<()> {
    if (200..300).contains(&last_status) {
        reporter.summary(pages, total_count)
    } else {
        reporter.incomplete(pages, last_status)
    }
}

/// The `urlList` array of a results manifest
fn url_list(manifest: &PageResult) -> Result<Vec<String>> {
    let list = manifest
        .json
        .as_ref()
        .and_then(|json| json.get("urlList"))
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::manifest("no urlList in the response"))?;

    Ok(list
        .iter()
        .filter_map(JsonValue::as_str)
        .map(str::to_string)
        .collect())
}

/// Local name for a decoded data file: the URL path after `<job uuid>/` up
/// to `.json.gz`, with `/` replaced by `_`, saved as `.json`
pub fn download_file_name(url: &str, job_uuid: &str) -> Option<String> {
    let marker = format!("{job_uuid}/");
    let start = url.find(&marker)? + marker.len();
    let end = start + url[start..].find(".json.gz")?;
    let stem = url[start..end].replace('/', "_");
    (!stem.is_empty()).then(|| format!("{stem}.json"))
}
