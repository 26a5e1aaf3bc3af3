use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;

use crate::filter::normalize_line;

/// Feeds every valid domain from `input` into the job queue.
///
/// Dropping `jobs` on return closes the queue, which is the only stop signal
/// workers get. Returns the number of domains queued.
pub async fn distribute<R>(mut input: R, jobs: Sender<String>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut queued = 0usize;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let Some(domain) = normalize_line(&line) else {
            tracing::trace!(line = %line.trim_end(), "skipping invalid input line");
            continue;
        };
        // blocks while the queue is full
        if jobs.send(domain.to_string()).await.is_err() {
            tracing::debug!("job queue closed before input was exhausted");
            break;
        }
        queued += 1;
    }
    tracing::debug!(queued, "input exhausted, closing job queue");
    Ok(queued)
}
