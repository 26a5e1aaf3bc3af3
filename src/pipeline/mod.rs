//! The discovery pipeline.
//!
//! ```text
//! stdin -> distributor -> [job queue] -> N workers -> [results queue] -> aggregator -> sink
//! ```
//!
//! Closing the job queue stops the workers; once every worker has exited the
//! results queue closes and the aggregator finishes.

pub mod aggregator;
pub mod distributor;
pub mod worker;

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{mpsc, Mutex};

use crate::config::RunConfig;
use crate::discover::CertificateSource;
use crate::error::PipelineError;
use crate::resolve::HostResolver;

pub use aggregator::{AggregateStats, Aggregator, Verdict};

/// Counters for one completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub domains_queued: usize,
    pub fetch_failures: usize,
    pub names_received: usize,
    pub duplicates: usize,
    pub wildcards_suppressed: usize,
    pub offline: usize,
    pub resolve_failures: usize,
    pub printed: usize,
}

pub struct Pipeline {
    config: Arc<RunConfig>,
    source: Arc<dyn CertificateSource>,
    resolver: Option<Arc<dyn HostResolver>>,
}

impl Pipeline {
    pub fn new(config: RunConfig, source: Arc<dyn CertificateSource>) -> Self {
        Self { config: Arc::new(config), source, resolver: None }
    }

    /// Enables the online filter: names without DNS records are withheld.
    pub fn with_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs until `input` is exhausted and every queued job has drained.
    ///
    /// Returns the sink so callers can inspect what was written.
    pub async fn run<I, W>(&self, input: I, sink: W) -> Result<(RunSummary, W), PipelineError>
    where
        I: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let cfg = self.config.clone();
        let (job_tx, job_rx) = mpsc::channel::<String>(cfg.job_capacity());
        let (result_tx, result_rx) = mpsc::channel::<String>(cfg.result_capacity());
        let jobs: worker::SharedJobs = Arc::new(Mutex::new(job_rx));

        let aggregator = Aggregator::new(cfg.clone(), self.resolver.clone());
        let agg_handle = tokio::spawn(aggregator.run(result_rx, sink));

        let n = cfg.worker_count();
        tracing::info!(workers = n, wildcards = cfg.print_wildcards, online = self.resolver.is_some(), "starting pipeline");
        let workers: Vec<_> = (0..n)
            .map(|id| {
                tokio::spawn(worker::run(id, cfg.clone(), self.source.clone(), jobs.clone(), result_tx.clone()))
            })
            .collect();
        // workers hold the only remaining handles to both queues
        drop(jobs);
        drop(result_tx);

        let domains_queued = match distributor::distribute(input, job_tx).await {
            Ok(n) => n,
            Err(e) => {
                for w in &workers {
                    w.abort();
                }
                agg_handle.abort();
                return Err(PipelineError::Input(e));
            }
        };

        let mut fetch_failures = 0usize;
        for res in futures::future::join_all(workers).await {
            fetch_failures += res?.failures;
        }

        let (sink, agg) = agg_handle.await?.map_err(PipelineError::Output)?;
        let summary = RunSummary {
            domains_queued,
            fetch_failures,
            names_received: agg.received,
            duplicates: agg.duplicates,
            wildcards_suppressed: agg.wildcards_suppressed,
            offline: agg.offline,
            resolve_failures: agg.resolve_failures,
            printed: agg.printed,
        };
        Ok((summary, sink))
    }
}
