use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::ResolveError;

/// Record types that count as "this host exists".
pub const LIVE_RECORD_TYPES: [RecordType; 6] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::CNAME,
    RecordType::MX,
    RecordType::SRV,
    RecordType::TXT,
];

#[async_trait]
pub trait HostResolver: Send + Sync {
    /// `Ok(true)` if at least one record of any supported type exists for `host`.
    async fn is_live(&self, host: &str) -> Result<bool, ResolveError>;
}

/// How a failed lookup for one record type is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    /// The server answered: no such host, or no records of that type.
    Absent,
    /// No usable answer at all (timeout, io, protocol, no servers).
    Failed,
}

pub fn classify(kind: &ResolveErrorKind) -> LookupFailure {
    match kind {
        ResolveErrorKind::NoRecordsFound { .. } => LookupFailure::Absent,
        _ => LookupFailure::Failed,
    }
}

pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Uses the system resolver configuration, falling back to public defaults.
    pub fn new(timeout: Duration) -> Self {
        let (config, opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                tracing::debug!(error = %e, "no usable system dns config, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self::with_config(config, opts, timeout)
    }

    pub fn with_config(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        opts.timeout = timeout;
        opts.attempts = 1;
        Self { inner: TokioAsyncResolver::tokio(config, opts) }
    }

    /// Plain-UDP/TCP resolver against explicit nameservers.
    pub fn with_nameservers(ips: &[IpAddr], port: u16, timeout: Duration) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(ips, port, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        Self::with_config(config, ResolverOpts::default(), timeout)
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn is_live(&self, host: &str) -> Result<bool, ResolveError> {
        let mut failure: Option<String> = None;
        for rtype in LIVE_RECORD_TYPES {
            match self.inner.lookup(host, rtype).await {
                Ok(lookup) if lookup.iter().next().is_some() => {
                    tracing::debug!(host, record = %rtype, "host is live");
                    return Ok(true);
                }
                Ok(_) => {}
                Err(e) => match classify(e.kind()) {
                    LookupFailure::Absent => {}
                    LookupFailure::Failed => {
                        tracing::debug!(host, record = %rtype, error = %e, "lookup failed");
                        failure.get_or_insert_with(|| e.to_string());
                    }
                },
            }
        }
        match failure {
            Some(reason) => Err(ResolveError::Lookup { host: host.to_string(), reason }),
            None => Ok(false),
        }
    }
}
