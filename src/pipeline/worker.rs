use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::Mutex;

use crate::config::RunConfig;
use crate::discover::CertificateSource;

/// Job queue end shared by every worker.
pub type SharedJobs = Arc<Mutex<Receiver<String>>>;

#[derive(Debug, Default, Clone, Copy)]
pub struct WorkerStats {
    pub fetched: usize,
    pub failures: usize,
    pub names_sent: usize,
}

/// One fetch worker: pull a domain, query it, push the names, pause, repeat.
///
/// Exits once the job queue is closed and drained, or when the results queue
/// has no consumer left. A failed fetch is reported and skipped.
pub async fn run(
    id: usize,
    config: Arc<RunConfig>,
    source: Arc<dyn CertificateSource>,
    jobs: SharedJobs,
    results: Sender<String>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    loop {
        let next = { jobs.lock().await.recv().await };
        let Some(domain) = next else { break };

        stats.fetched += 1;
        match source.fetch(&domain).await {
            Ok(names) => {
                tracing::debug!(worker = id, domain = %domain, names = names.len(), "fetched");
                for name in names {
                    if results.send(name).await.is_err() {
                        tracing::debug!(worker = id, "results queue closed, stopping");
                        return stats;
                    }
                    stats.names_sent += 1;
                }
            }
            Err(e) => {
                stats.failures += 1;
                if !config.silent {
                    tracing::warn!(worker = id, domain = %domain, "{}", e);
                }
            }
        }

        // courtesy delay against the shared public endpoint
        if !config.throttle_delay.is_zero() {
            tokio::time::sleep(config.throttle_delay).await;
        }
    }
    tracing::debug!(worker = id, fetched = stats.fetched, "job queue drained");
    stats
}
