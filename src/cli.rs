use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

/// Every flag is optional; with no arguments the tool checks
/// http://localhost:3000 and always exits 0.
#[derive(Parser, Debug)]
#[command(name = "rezide-smoke", about = "Smoke tests for the Rezide LinkedIn Post app")]
pub struct Cli {
    /// Base URL of the running app (default: http://localhost:3000)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Post id sent to /api/likes (default: main-post)
    #[arg(long)]
    pub post_id: Option<String>,

    /// TOML file with base_url, post_id, timeout_secs and [page] markers
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Exit 1 when checks fail and 2 on setup errors instead of always 0
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            post_id: self.post_id.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
