use serde::Deserialize;
use std::time::Duration;

use crate::user_agent::UserAgentProfile;

pub const DEFAULT_ENDPOINT: &str = "https://crt.sh/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_THROTTLE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RESULT_QUEUE_CAPACITY: usize = 1024;

/// Settings for one run. Built once at startup and shared read-only.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of parallel fetch workers
    pub runners: usize,
    /// Emit names starting with `*.`
    pub print_wildcards: bool,
    /// Only emit names that have at least one DNS record
    pub online_only: bool,
    /// Suppress per-item error diagnostics
    pub silent: bool,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// Pause each worker takes after every request
    #[serde(with = "duration_millis")]
    pub throttle_delay: Duration,
    #[serde(with = "duration_secs")]
    pub dns_timeout: Duration,
    pub endpoint: String,
    pub user_agent_profile: UserAgentProfile,
    pub job_queue_capacity: usize,
    pub result_queue_capacity: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runners: 1,
            print_wildcards: false,
            online_only: false,
            silent: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            throttle_delay: DEFAULT_THROTTLE_DELAY,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent_profile: UserAgentProfile::Desktop,
            job_queue_capacity: 1,
            result_queue_capacity: DEFAULT_RESULT_QUEUE_CAPACITY,
        }
    }
}

impl RunConfig {
    /// Worker count actually spawned; never zero.
    pub fn worker_count(&self) -> usize {
        self.runners.max(1)
    }

    pub fn job_capacity(&self) -> usize {
        self.job_queue_capacity.max(1)
    }

    pub fn result_capacity(&self) -> usize {
        self.result_queue_capacity.max(1)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.runners, 1);
        assert!(!cfg.print_wildcards);
        assert!(!cfg.online_only);
        assert!(!cfg.silent);
        assert_eq!(cfg.throttle_delay, Duration::from_secs(1));
        assert_eq!(cfg.endpoint, "https://crt.sh/");
    }

    #[test]
    fn zero_runners_still_spawns_one_worker() {
        let cfg = RunConfig { runners: 0, job_queue_capacity: 0, result_queue_capacity: 0, ..Default::default() };
        assert_eq!(cfg.worker_count(), 1);
        assert_eq!(cfg.job_capacity(), 1);
        assert_eq!(cfg.result_capacity(), 1);
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{"runners": 4, "print_wildcards": true, "throttle_delay": 250, "request_timeout": 3, "user_agent_profile": "linux"}"#,
        )
        .unwrap();
        assert_eq!(cfg.runners, 4);
        assert!(cfg.print_wildcards);
        assert_eq!(cfg.throttle_delay, Duration::from_millis(250));
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
        assert_eq!(cfg.user_agent_profile, UserAgentProfile::Linux);
        assert_eq!(cfg.result_queue_capacity, DEFAULT_RESULT_QUEUE_CAPACITY);
    }
}
