use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::audit::in_flight::InFlight;
use crate::audit::worker::{self, QueuedRecord};
use crate::errors::InternalError;
use crate::errors::internal::AuditError;
use crate::stores::Storer;
use crate::types::internal::audit::{Record, RecordId};
use crate::types::internal::order::OrderBy;
use crate::types::internal::pagination::{Page, PageResponse};

/// Sizing of the recorder's queue and worker pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditConfig {
    pub buffer_size: usize,
    pub worker_count: usize,
}

impl AuditConfig {
    pub const DEFAULT_BUFFER_SIZE: usize = 1000;
    pub const DEFAULT_WORKER_COUNT: usize = 3;

    pub fn new(buffer_size: usize, worker_count: usize) -> Self {
        Self {
            buffer_size,
            worker_count,
        }
    }

    /// Replace zero values with the defaults
    pub fn normalized(self) -> Self {
        Self {
            buffer_size: if self.buffer_size == 0 {
                Self::DEFAULT_BUFFER_SIZE
            } else {
                self.buffer_size
            },
            worker_count: if self.worker_count == 0 {
                Self::DEFAULT_WORKER_COUNT
            } else {
                self.worker_count
            },
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUFFER_SIZE, Self::DEFAULT_WORKER_COUNT)
    }
}

/// Asynchronous audit recorder
///
/// Records are pushed into a bounded queue and persisted by a fixed pool of
/// background workers. Producers never see persistence errors: a failed write
/// is logged and the record dropped. When the queue is full, `record` waits
/// for a free slot instead of dropping or buffering without bound.
///
/// With more than one worker, records from different producers may be
/// persisted in any order.
///
/// # Shutdown
///
/// `shutdown` closes the queue for writes, signals the workers, and waits for
/// every accepted record to be persisted or dropped. Workers drain the queue
/// completely before exiting. If the deadline passes first, the workers are
/// left running and `AuditError::ShutdownTimeout` is returned.
pub struct AuditRecorder {
    config: AuditConfig,
    storer: Arc<dyn Storer>,
    sender: RwLock<Option<mpsc::Sender<QueuedRecord>>>,
    in_flight: Arc<InFlight>,
    stop: CancellationToken,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl AuditRecorder {
    /// Create the recorder and start its workers
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: AuditConfig, storer: Arc<dyn Storer>) -> Self {
        let config = config.normalized();
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let queue = Arc::new(Mutex::new(receiver));
        let stop = CancellationToken::new();

        let workers = (0..config.worker_count)
            .map(|worker_id| {
                tokio::spawn(worker::run(
                    worker_id,
                    Arc::clone(&queue),
                    Arc::clone(&storer),
                    stop.clone(),
                ))
            })
            .collect();

        tracing::info!(
            buffer_size = config.buffer_size,
            worker_count = config.worker_count,
            "audit recorder started"
        );

        Self {
            config,
            storer,
            sender: RwLock::new(Some(sender)),
            in_flight: Arc::new(InFlight::new()),
            stop,
            workers: Mutex::new(workers),
        }
    }

    pub fn config(&self) -> AuditConfig {
        self.config
    }

    /// Number of records accepted but not yet persisted or dropped
    pub fn in_flight(&self) -> usize {
        self.in_flight.count()
    }

    /// Queue a record for persistence
    ///
    /// Assigns an id when the record has none. Waits while the queue is full.
    /// After shutdown has begun the record is rejected and only logged.
    pub async fn record(&self, mut record: Record) {
        if record.id.is_unset() {
            record.id = RecordId::new();
        }

        let in_flight = self.in_flight.enter();

        let Some(sender) = self.sender.read().await.clone() else {
            Self::reject(&record);
            return;
        };

        if let Err(mpsc::error::SendError(queued)) = sender.send(QueuedRecord { record, in_flight }).await {
            Self::reject(&queued.record);
        }
    }

    /// Queue a record from synchronous code, blocking the current thread while the queue is full
    ///
    /// # Panics
    /// Panics when called from within an asynchronous execution context.
    pub fn record_blocking(&self, mut record: Record) {
        if record.id.is_unset() {
            record.id = RecordId::new();
        }

        let in_flight = self.in_flight.enter();

        let Some(sender) = self.sender.blocking_read().clone() else {
            Self::reject(&record);
            return;
        };

        if let Err(mpsc::error::SendError(queued)) = sender.blocking_send(QueuedRecord { record, in_flight }) {
            Self::reject(&queued.record);
        }
    }

    fn reject(record: &Record) {
        tracing::warn!(
            record_id = %record.id,
            request_id = %record.request_id,
            action = %record.action,
            "audit recorder is shut down; record rejected"
        );
    }

    /// Fetch a persisted record
    pub async fn get(&self, id: RecordId) -> Result<Record, InternalError> {
        self.storer.get(id).await
    }

    /// Fetch one page of persisted records along with collection totals
    pub async fn list(&self, page: Page, order_by: OrderBy) -> Result<PageResponse<Record>, InternalError> {
        let records = self.storer.list(page, order_by).await?;
        let total_rows = self.storer.count().await?;

        Ok(PageResponse::new(page, total_rows, records))
    }

    /// Stop accepting records and wait up to `timeout` for the queue to drain
    ///
    /// Safe to call more than once. On timeout the workers are not aborted;
    /// they keep draining in the background.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), AuditError> {
        // Producers already waiting on a full queue hold their own sender clones
        // and still get their records in.
        self.sender.write().await.take();
        self.stop.cancel();

        let drained = async {
            self.in_flight.wait_idle().await;

            let mut workers = self.workers.lock().await;
            while let Some(handle) = workers.pop() {
                if let Err(e) = handle.await {
                    tracing::error!(error = %e, "audit worker terminated abnormally");
                }
            }
        };

        match tokio::time::timeout(timeout, drained).await {
            Ok(()) => {
                tracing::info!("all audit workers shut down gracefully");
                Ok(())
            }
            Err(_) => {
                let pending = self.in_flight.count();
                tracing::warn!(pending, ?timeout, "audit shutdown timed out; workers did not finish in time");
                Err(AuditError::ShutdownTimeout { pending })
            }
        }
    }
}
