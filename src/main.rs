use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};

use xsmb_tally::config::{BOT_TOKEN_VAR, CHAT_ID_VAR};
use xsmb_tally::{utils, Args, Config};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    info!("🚀 Starting special prize tally");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!(
                action = "load",
                component = "config",
                error = %e,
                "⚠️ Set {} and {} before running",
                BOT_TOKEN_VAR,
                CHAT_ID_VAR
            );
            std::process::exit(1);
        }
    };

    let today = Local::now().date_naive();
    match xsmb_tally::run(&config, today) {
        Ok(_) => {
            info!("✅ All done");
            Ok(())
        }
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
