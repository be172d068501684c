mod terminal;

use std::path::PathBuf;

use clap::Parser;

/// Search videos for a keyword, arrange and pick them, and export the
/// selection as a static HTML manual.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Keyword to search for on startup.
    pub keyword: Option<String>,

    /// RON configuration file.
    #[arg(long, default_value = terminal::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory exported manuals are written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// YouTube Data API key.
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log file path.
    #[arg(long, default_value = manual_logging::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Also log to the terminal.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    terminal::run_app(args)
}
