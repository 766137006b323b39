use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ghsearch::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search GitHub users from the terminal")]
struct Cli {
    /// Search term to start with.
    query: Option<String>,

    /// Config file (default: <config dir>/ghsearch/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL, e.g. for GitHub Enterprise.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ghsearch::logging::init_tracing();

    let path = cli.config.unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate().context("Invalid --base-url")?;
    }

    ghsearch::ui::run(&config, cli.query)
}
