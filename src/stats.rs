use std::collections::HashMap;
use std::fmt;
use tracing::info;

/// Last two characters of a day's special prize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultCode(String);

impl ResultCode {
    /// Takes the last two characters of `text`, or `None` when it is shorter.
    pub fn from_prize_text(text: &str) -> Option<Self> {
        let count = text.chars().count();
        if count < 2 {
            return None;
        }
        Some(Self(text.chars().skip(count - 2).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub code: ResultCode,
    pub count: u32,
}

#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<ResultCode, u32>,
}

impl FrequencyTable {
    pub fn from_history(history: &[ResultCode]) -> Self {
        let mut counts = HashMap::new();
        for code in history {
            *counts.entry(code.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, code: &ResultCode) -> u32 {
        self.counts.get(code).copied().unwrap_or(0)
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Highest counts first; equal counts are ordered by ascending code.
    pub fn rank(&self, limit: usize) -> Vec<RankedEntry> {
        let mut sorted: Vec<(&ResultCode, &u32)> = self.counts.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        sorted
            .into_iter()
            .take(limit)
            .map(|(code, count)| RankedEntry {
                code: code.clone(),
                count: *count,
            })
            .collect()
    }

    pub fn top_ten(&self) -> Vec<RankedEntry> {
        self.rank(10)
    }
}

pub fn rank_history(history: &[ResultCode], limit: usize) -> Vec<RankedEntry> {
    let table = FrequencyTable::from_history(history);
    let ranked = table.rank(limit);
    info!(
        action = "complete",
        component = "ranking",
        history_len = history.len(),
        distinct_codes = table.distinct(),
        ranked = ranked.len(),
        "Frequency ranking completed"
    );
    ranked
}

pub const RANKING_HEADER: &str = "🔮 Top 10 số đề nhiều nhất:";

/// Same fixed "Top 10" wording as the outbound message, whatever the length.
pub fn ranking_lines(ranked: &[RankedEntry]) -> Vec<String> {
    let mut lines = vec![RANKING_HEADER.to_string()];
    lines.extend(
        ranked
            .iter()
            .map(|entry| format!("  → {}: {} lần", entry.code, crate::utils::format_number(entry.count))),
    );
    lines
}

pub fn print_ranking(ranked: &[RankedEntry]) {
    for line in ranking_lines(ranked) {
        println!("{line}");
    }
}
