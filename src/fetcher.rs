use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::dates::{page_date, DateRange};
use crate::html::TableParser;
use crate::stats::ResultCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("result table `{0}` not found")]
    MissingTable(String),
    #[error("special prize cell not found")]
    MissingCell,
}

/// What a successfully parsed page says about one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(ResultCode),
    /// The prize cell exists but holds fewer than two characters.
    NoResult,
}

/// Where result pages come from.
pub trait PageSource {
    fn fetch_page(&self, date: NaiveDate) -> Result<String, FetchError>;
}

pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")
}

pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn page_url(&self, date: NaiveDate) -> Result<Url, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}.html", base, page_date(date)))?)
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&self, date: NaiveDate) -> Result<String, FetchError> {
        let url = self.page_url(date)?;
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

/// Reads the special prize out of a result page.
pub fn extract_outcome(parser: &TableParser, html: &str) -> Result<DrawOutcome, FetchError> {
    let visible = parser.strip_hidden(html);
    let table = parser
        .find_table(&visible)
        .ok_or_else(|| FetchError::MissingTable(parser.class().to_string()))?;
    let cells = parser.table_cells(table);
    let prize = cells.get(1).ok_or(FetchError::MissingCell)?;

    Ok(match ResultCode::from_prize_text(&parser.text_content(prize)) {
        Some(code) => DrawOutcome::Drawn(code),
        None => DrawOutcome::NoResult,
    })
}

#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Sleep after every request.
    pub delay: Duration,
    /// Log progress every this many days; zero disables it.
    pub progress_interval: usize,
}

impl Pacing {
    pub fn from_config(config: &Config) -> Self {
        Self {
            delay: config.request_delay,
            progress_interval: config.progress_interval,
        }
    }
}

pub struct Fetcher<S> {
    source: S,
    parser: TableParser,
}

impl<S: PageSource> Fetcher<S> {
    pub fn new(source: S, parser: TableParser) -> Self {
        Self { source, parser }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fetch_outcome(&self, date: NaiveDate) -> Result<DrawOutcome, FetchError> {
        let html = self.source.fetch_page(date)?;
        extract_outcome(&self.parser, &html)
    }

    /// Visits every day in `range` in order, one request at a time. Days
    /// without a usable code are logged and left out.
    pub fn collect_history(&self, range: &DateRange, pacing: Pacing) -> Vec<ResultCode> {
        let start_time = Instant::now();
        let total_days = range.len();
        info!(
            action = "start",
            component = "history_collection",
            start = %range.start,
            end = %range.end,
            total_days,
            "📊 Collecting results"
        );

        let mut history = Vec::new();
        for (index, date) in range.days().enumerate() {
            let date_str = page_date(date);
            debug!(action = "fetch", component = "history_collection", date = %date_str, "🌐 Fetching result page");

            match self.fetch_outcome(date) {
                Ok(DrawOutcome::Drawn(code)) => {
                    debug!(action = "extract", component = "history_collection", date = %date_str, code = %code, "Special prize code extracted");
                    history.push(code);
                }
                Ok(DrawOutcome::NoResult) => {
                    warn!(action = "skip", component = "history_collection", date = %date_str, "⚠️ No result for this date, skipping");
                }
                Err(e) => {
                    warn!(action = "skip", component = "history_collection", date = %date_str, error = %e, "❌ Could not read result, skipping");
                }
            }

            let processed = index + 1;
            if pacing.progress_interval > 0 && processed % pacing.progress_interval == 0 {
                info!(
                    action = "progress",
                    component = "history_collection",
                    processed,
                    total_days,
                    "⏳ Processed {}/{} days",
                    processed,
                    total_days
                );
            }

            if !pacing.delay.is_zero() {
                thread::sleep(pacing.delay);
            }
        }

        info!(
            action = "complete",
            component = "history_collection",
            valid_results = history.len(),
            total_days,
            duration_ms = start_time.elapsed().as_millis(),
            "✅ Collected {} valid results",
            crate::utils::format_number(history.len() as u32)
        );
        history
    }
}
