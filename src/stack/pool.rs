//! Bounded worker pool for oracle queries
//!
//! A fixed number of workers drain a bounded work queue. Each worker emits one
//! outcome per item into a results channel; the channel closing once every
//! worker has exited is the completion signal. The first error aborts every
//! remaining task and nothing collected so far is returned.

use crate::error::{Error, OracleError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::warn;

type Outcome<T> = std::result::Result<Option<(String, T)>, OracleError>;

/// Run `job` for every item with at most `concurrency` jobs in flight
///
/// Items for which `job` returns `Ok(None)` are dropped from the output.
/// Output order is completion order and carries no meaning.
pub(crate) async fn run_bounded<T, F, Fut>(
    items: Vec<String>,
    concurrency: usize,
    job: F,
) -> Result<Vec<(String, T)>>
where
    T: Send + 'static,
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Option<T>, OracleError>> + Send + 'static,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let workers = concurrency.clamp(1, items.len());
    let expected = items.len();

    let (work_tx, work_rx) = mpsc::channel::<String>(workers);
    let work_rx = Arc::new(Mutex::new(work_rx));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Outcome<T>>();
    let job = Arc::new(job);
    let mut tasks = JoinSet::new();

    tasks.spawn(async move {
        for item in items {
            // Receiver gone means the pool already failed
            if work_tx.send(item).await.is_err() {
                break;
            }
        }
    });

    for _ in 0..workers {
        let work_rx = Arc::clone(&work_rx);
        let result_tx = result_tx.clone();
        let job = Arc::clone(&job);
        tasks.spawn(async move {
            loop {
                let next = work_rx.lock().await.recv().await;
                let Some(item) = next else { break };
                let outcome = match (*job)(item.clone()).await {
                    Ok(value) => Ok(value.map(|v| (item, v))),
                    Err(e) => Err(e),
                };
                let failed = outcome.is_err();
                if result_tx.send(outcome).is_err() || failed {
                    break;
                }
            }
        });
    }
    drop(result_tx);

    let mut collected = Vec::with_capacity(expected);
    while let Some(outcome) = result_rx.recv().await {
        match outcome {
            Ok(Some(entry)) => collected.push(entry),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "oracle query failed, abandoning remaining work");
                tasks.abort_all();
                return Err(e.into());
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(|e| Error::Internal(format!("worker task failed: {e}")))?;
    }

    Ok(collected)
}
