pub mod args;
pub mod config;
pub mod dates;
pub mod fetcher;
pub mod html;
pub mod notifier;
pub mod pipeline;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use config::Config;
pub use pipeline::{run, RunReport};
pub use stats::{FrequencyTable, RankedEntry, ResultCode};
