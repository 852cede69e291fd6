use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "xsmb-tally",
    about = "Tally the last two digits of the Northern lottery special prize and send the top 10 to Telegram",
    version,
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
