use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when verbose.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second]"
        )))
        .with_target(false)
        .compact()
        .init();
}

pub fn format_number(num: u32) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Masks every occurrence of `secret` in `text`, keeping the part before
/// the first `:` so a bot token stays recognisable in logs.
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    let masked = match secret.split_once(':') {
        Some((id, rest)) => format!("{}:{}", id, "*".repeat(rest.chars().count())),
        None => "*".repeat(secret.chars().count()),
    };
    text.replace(secret, &masked)
}
