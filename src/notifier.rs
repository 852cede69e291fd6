use chrono::NaiveDate;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{error, info};

use crate::dates::display_date;
use crate::stats::RankedEntry;
use crate::utils::redact_secret;

/// How a single send attempt ended. None of these fail the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Delivered,
    Rejected { status: u16, body: String },
    Failed(String),
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SendOutcome::Delivered)
    }
}

pub fn format_message(ranked: &[RankedEntry], today: NaiveDate) -> String {
    let mut message = format!("*📅 Dự đoán 10 số đề ngày {}*\n\n", display_date(today));
    for entry in ranked {
        message.push_str(&format!("• `{}` — {} lần\n", entry.code, entry.count));
    }
    message.push_str("\n🎯 Chúc bạn may mắn hôm nay!");
    message
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        client: Client,
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }

    /// Posts `text` once. Errors are logged and reported, never retried.
    pub fn send(&self, text: &str) -> SendOutcome {
        info!(action = "start", component = "telegram", chat_id = %self.chat_id, "📤 Sending result to Telegram");

        let form = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "Markdown"),
        ];

        let response = match self.client.post(self.endpoint()).form(&form).send() {
            Ok(response) => response,
            Err(e) => {
                let reason = redact_secret(&e.to_string(), &self.bot_token);
                error!(action = "send", component = "telegram", error = %reason, "❌ Telegram request failed");
                return SendOutcome::Failed(reason);
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            info!(action = "complete", component = "telegram", "📨 Result sent successfully");
            return SendOutcome::Delivered;
        }

        let body = response.text().unwrap_or_default();
        error!(
            action = "send",
            component = "telegram",
            status = status.as_u16(),
            body = %body,
            "❌ Telegram rejected the message"
        );
        SendOutcome::Rejected {
            status: status.as_u16(),
            body,
        }
    }
}
