pub mod sweep;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use invsweep_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_ENDPOINT, DEFAULT_MAX_ATTEMPTS, RetryPolicy,
};

#[derive(Parser)]
#[command(name = "invsweep")]
#[command(about = "Collects hardware inventory from every host in an IPv4 range.")]
pub struct CommandLine {
    /// Range to sweep, e.g. 192.168.1.1-192.168.1.100. Prompted for when omitted
    pub range: Option<String>,

    /// Inventory endpoint; `{IP}` is replaced by each address
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Maximum number of hosts queried at the same time
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u64,

    /// Attempts per host before it is reported as failed
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub retry_delay_ms: u64,

    /// Directory receiving the CSV report and the error log
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Hide banner, headers and the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            endpoint: self.endpoint.clone(),
            concurrency: self.concurrency,
            retry: RetryPolicy {
                max_attempts: self.attempts,
                delay: Duration::from_millis(self.retry_delay_ms),
            },
            request_timeout: Duration::from_secs(self.timeout),
            output_dir: self.output_dir.clone(),
            quiet: self.quiet,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
