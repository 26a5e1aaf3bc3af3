use clap::Parser;
use std::time::Duration;

use crtsh_hunter::config::{DEFAULT_ENDPOINT, DEFAULT_RESULT_QUEUE_CAPACITY};
use crtsh_hunter::user_agent::UserAgentProfile;
use crtsh_hunter::RunConfig;

/// Enumerate certificate transparency names for domains read from stdin.
///
/// Example: cat domains.txt | crtsh_hunter -r 4 --online
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of parallel runners querying crt.sh
    #[arg(short = 'r', long, visible_alias = "threads", default_value_t = 1_usize)]
    pub runners: usize,

    /// Print wildcard certificate names (*.example.com)
    #[arg(short = 'w', long, default_value_t = false)]
    pub wildcards: bool,

    /// Only print names that still resolve in DNS
    #[arg(short = 'o', long, visible_alias = "resolve", default_value_t = false)]
    pub online: bool,

    /// Do not print errors to stderr
    #[arg(short = 's', long, default_value_t = false)]
    pub silent: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10_u64)]
    pub timeout: u64,

    /// Pause per runner between requests, in milliseconds
    #[arg(long, default_value_t = 1000_u64)]
    pub delay_ms: u64,

    /// DNS query timeout in seconds (with --online)
    #[arg(long, default_value_t = 5_u64)]
    pub dns_timeout: u64,

    /// Certificate search endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Browser family used for the random User-Agent
    #[arg(long, value_enum, default_value_t = UserAgentProfile::Desktop)]
    pub ua_profile: UserAgentProfile,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        let runners = self.runners.max(1);
        RunConfig {
            runners,
            print_wildcards: self.wildcards,
            online_only: self.online,
            silent: self.silent,
            request_timeout: Duration::from_secs(self.timeout),
            throttle_delay: Duration::from_millis(self.delay_ms),
            dns_timeout: Duration::from_secs(self.dns_timeout),
            endpoint: self.endpoint.clone(),
            user_agent_profile: self.ua_profile,
            job_queue_capacity: runners,
            result_queue_capacity: DEFAULT_RESULT_QUEUE_CAPACITY,
        }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
