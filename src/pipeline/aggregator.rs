use ahash::AHashSet;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::Receiver;

use crate::config::RunConfig;
use crate::resolve::HostResolver;

pub const WILDCARD_PREFIX: &str = "*.";

/// What happened to one incoming name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Duplicate,
    Wildcard,
    Offline,
    ResolveFailed,
    Print,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AggregateStats {
    pub received: usize,
    pub duplicates: usize,
    pub wildcards_suppressed: usize,
    pub offline: usize,
    pub resolve_failures: usize,
    pub printed: usize,
}

/// Single consumer of the results queue. Owns the seen-set outright.
pub struct Aggregator {
    config: Arc<RunConfig>,
    resolver: Option<Arc<dyn HostResolver>>,
    seen: AHashSet<String>,
    stats: AggregateStats,
}

impl Aggregator {
    /// Resolution filtering is active iff `resolver` is set.
    pub fn new(config: Arc<RunConfig>, resolver: Option<Arc<dyn HostResolver>>) -> Self {
        Self { config, resolver, seen: AHashSet::new(), stats: AggregateStats::default() }
    }

    /// Decides the fate of `name`. Only the first arrival of a string is ever
    /// looked at; every later copy is a duplicate, wildcard or not.
    pub async fn process(&mut self, name: &str) -> Verdict {
        self.stats.received += 1;
        if !self.seen.insert(name.to_string()) {
            self.stats.duplicates += 1;
            return Verdict::Duplicate;
        }

        if name.starts_with(WILDCARD_PREFIX) && !self.config.print_wildcards {
            self.stats.wildcards_suppressed += 1;
            return Verdict::Wildcard;
        }

        if let Some(resolver) = &self.resolver {
            match resolver.is_live(name).await {
                Ok(true) => {}
                Ok(false) => {
                    self.stats.offline += 1;
                    tracing::debug!(name, "no dns records, withheld");
                    return Verdict::Offline;
                }
                Err(e) => {
                    // fail closed
                    self.stats.resolve_failures += 1;
                    if !self.config.silent {
                        tracing::warn!("{}", e);
                    }
                    return Verdict::ResolveFailed;
                }
            }
        }

        self.stats.printed += 1;
        Verdict::Print
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Drains `results` into `sink`, one flushed line per surviving name.
    pub async fn run<W>(mut self, mut results: Receiver<String>, mut sink: W) -> std::io::Result<(W, AggregateStats)>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(name) = results.recv().await {
            if self.process(&name).await == Verdict::Print {
                sink.write_all(name.as_bytes()).await?;
                sink.write_all(b"\n").await?;
                sink.flush().await?;
            }
        }
        sink.flush().await?;
        tracing::debug!(distinct = self.seen_len(), "results queue drained");
        Ok((sink, self.stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct Fixed(Result<bool, ()>);

    #[async_trait]
    impl HostResolver for Fixed {
        async fn is_live(&self, host: &str) -> Result<bool, ResolveError> {
            self.0.map_err(|_| ResolveError::Lookup { host: host.to_string(), reason: "SERVFAIL".into() })
        }
    }

    fn cfg(print_wildcards: bool) -> Arc<RunConfig> {
        Arc::new(RunConfig { print_wildcards, silent: true, ..Default::default() })
    }

    #[tokio::test]
    async fn duplicate_after_first_arrival() {
        let mut agg = Aggregator::new(cfg(false), None);
        assert_eq!(agg.process("www.example.com").await, Verdict::Print);
        assert_eq!(agg.process("www.example.com").await, Verdict::Duplicate);
        assert_eq!(agg.process("WWW.example.com").await, Verdict::Print);
        assert_eq!(agg.seen_len(), 2);
    }

    #[tokio::test]
    async fn suppressed_wildcard_stays_seen() {
        let mut agg = Aggregator::new(cfg(false), None);
        assert_eq!(agg.process("*.example.com").await, Verdict::Wildcard);
        assert_eq!(agg.process("*.example.com").await, Verdict::Duplicate);
        let stats = agg.stats();
        assert_eq!(stats.wildcards_suppressed, 1);
        assert_eq!(stats.duplicates, 1);
    }

    #[tokio::test]
    async fn wildcards_pass_when_enabled() {
        let mut agg = Aggregator::new(cfg(true), None);
        assert_eq!(agg.process("*.example.com").await, Verdict::Print);
    }

    #[tokio::test]
    async fn resolver_outcomes() {
        let mut dead = Aggregator::new(cfg(false), Some(Arc::new(Fixed(Ok(false)))));
        assert_eq!(dead.process("stale.example.com").await, Verdict::Offline);

        let mut broken = Aggregator::new(cfg(false), Some(Arc::new(Fixed(Err(())))));
        assert_eq!(broken.process("www.example.com").await, Verdict::ResolveFailed);
        // failed names are not retried on a later arrival
        assert_eq!(broken.process("www.example.com").await, Verdict::Duplicate);

        let mut live = Aggregator::new(cfg(false), Some(Arc::new(Fixed(Ok(true)))));
        assert_eq!(live.process("www.example.com").await, Verdict::Print);
    }

    #[tokio::test]
    async fn run_writes_one_line_per_distinct_name() {
        let (tx, rx) = mpsc::channel(8);
        let agg = Aggregator::new(cfg(false), None);
        let handle = tokio::spawn(agg.run(rx, Vec::new()));
        for name in ["a.example.com", "*.example.com", "a.example.com", "b.example.com"] {
            tx.send(name.to_string()).await.unwrap();
        }
        drop(tx);
        let (out, stats) = handle.await.unwrap().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a.example.com\nb.example.com\n");
        assert_eq!(stats.printed, 2);
        assert_eq!(stats.received, 4);
    }
}
