use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::audit::in_flight::InFlightGuard;
use crate::stores::Storer;
use crate::types::internal::audit::Record;

/// A record waiting in the queue, holding its in-flight slot
pub(crate) struct QueuedRecord {
    pub record: Record,
    pub in_flight: InFlightGuard,
}

/// Receiving half of the bounded queue, shared by every worker
pub(crate) type SharedQueue = Arc<Mutex<mpsc::Receiver<QueuedRecord>>>;

async fn next_record(queue: &SharedQueue) -> Option<QueuedRecord> {
    queue.lock().await.recv().await
}

/// Worker loop: persist records until stopped, then drain what is left
///
/// After the stop signal the worker keeps taking records until the queue is
/// closed for writes and empty, so nothing accepted before shutdown is abandoned.
pub(crate) async fn run(
    worker_id: usize,
    queue: SharedQueue,
    storer: Arc<dyn Storer>,
    stop: CancellationToken,
) {
    let mut persisted: u64 = 0;

    loop {
        tokio::select! {
            () = stop.cancelled() => break,
            next = next_record(&queue) => {
                match next {
                    Some(queued) => {
                        persist(worker_id, storer.as_ref(), queued).await;
                        persisted += 1;
                    }
                    None => {
                        tracing::info!(worker_id, persisted, "audit queue closed; worker shutting down");
                        return;
                    }
                }
            }
        }
    }

    tracing::debug!(worker_id, "audit worker draining queue");
    while let Some(queued) = next_record(&queue).await {
        persist(worker_id, storer.as_ref(), queued).await;
        persisted += 1;
    }

    tracing::info!(worker_id, persisted, "audit worker shutting down");
}

/// Write one record; failures are logged and the record is dropped
async fn persist(worker_id: usize, storer: &dyn Storer, queued: QueuedRecord) {
    let QueuedRecord {
        record,
        in_flight: _in_flight,
    } = queued;

    if let Err(e) = storer.create(&record).await {
        tracing::error!(
            worker_id,
            record_id = %record.id,
            request_id = %record.request_id,
            action = %record.action,
            resource_type = %record.resource_type,
            resource_id = record.resource_id,
            user_id = record.user_id,
            error = %e,
            "failed to create audit record"
        );
    }
}
