use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::dates::DateRange;
use crate::fetcher::{build_client, Fetcher, HttpPageSource, Pacing};
use crate::html::TableParser;
use crate::notifier::{format_message, SendOutcome, TelegramNotifier};
use crate::stats::{print_ranking, rank_history, RankedEntry};

#[derive(Debug)]
pub struct RunReport {
    pub range: DateRange,
    pub collected: usize,
    pub ranked: Vec<RankedEntry>,
    pub delivery: SendOutcome,
}

/// Fetch, rank and notify, once. Only setup problems are errors; a failed
/// send is reported in `RunReport::delivery`.
pub fn run(config: &Config, today: NaiveDate) -> Result<RunReport> {
    let total_start_time = Instant::now();
    let range = DateRange::new(config.start_date, today);

    let client = build_client(config)?;
    let parser = TableParser::new(&config.result_table_class)
        .context("Failed to compile result table matchers")?;
    let fetcher = Fetcher::new(
        HttpPageSource::new(client.clone(), config.results_base_url.as_str()),
        parser,
    );

    let history = fetcher.collect_history(&range, Pacing::from_config(config));
    let ranked = rank_history(&history, config.top_n);
    print_ranking(&ranked);

    let message = format_message(&ranked, today);
    let notifier = TelegramNotifier::new(
        client,
        config.telegram_api_base.as_str(),
        config.bot_token.as_str(),
        config.chat_id.as_str(),
    );
    let delivery = notifier.send(&message);

    info!(
        action = "complete",
        component = "pipeline",
        collected = history.len(),
        delivered = delivery.is_delivered(),
        duration_ms = total_start_time.elapsed().as_millis(),
        "✅ Run finished"
    );

    Ok(RunReport {
        range,
        collected: history.len(),
        ranked,
        delivery,
    })
}
