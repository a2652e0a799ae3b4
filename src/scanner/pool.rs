// Worker Pool - Fixed number of tasks draining a bounded target queue
//
// Exactly `workers` tasks share one receiver. The queue capacity equals the
// worker count, so producers block once every worker is busy and the backlog
// is full. Workers exit when the queue is closed and empty.

use crate::certificates::CertificateSource;
use crate::output::ResultSink;
use crate::scanner::stats::{HarvestStats, StatsTracker};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Sending half of the target queue
pub type TargetQueue = mpsc::Sender<String>;

type SharedReceiver = Arc<Mutex<mpsc::Receiver<String>>>;

/// Pool of certificate-harvesting workers
pub struct WorkerPool {
    workers: usize,
    source: Arc<dyn CertificateSource>,
    sink: Arc<ResultSink>,
    stats: StatsTracker,
}

impl WorkerPool {
    /// Create a pool; a worker count of zero is treated as one
    pub fn new(
        workers: usize,
        source: Arc<dyn CertificateSource>,
        sink: Arc<ResultSink>,
        stats: StatsTracker,
    ) -> Self {
        Self {
            workers: workers.max(1),
            source,
            sink,
            stats,
        }
    }

    /// Spawn the workers and return the queue feeding them
    ///
    /// Dropping every clone of the returned queue lets the workers drain and
    /// stop; `PoolHandle::join` waits for that.
    pub fn start(self) -> (TargetQueue, PoolHandle) {
        let (tx, rx) = mpsc::channel::<String>(self.workers);
        let receiver: SharedReceiver = Arc::new(Mutex::new(rx));

        debug!("Starting {} workers", self.workers);

        let handles = (0..self.workers)
            .map(|id| {
                let receiver = Arc::clone(&receiver);
                let source = Arc::clone(&self.source);
                let sink = Arc::clone(&self.sink);
                let stats = self.stats.clone();
                tokio::spawn(run_worker(id, receiver, source, sink, stats))
            })
            .collect();

        let handle = PoolHandle {
            handles,
            sink: self.sink,
            stats: self.stats,
        };

        (tx, handle)
    }
}

async fn run_worker(
    id: usize,
    receiver: SharedReceiver,
    source: Arc<dyn CertificateSource>,
    sink: Arc<ResultSink>,
    stats: StatsTracker,
) {
    loop {
        // Lock only for the receive so other workers can pick up targets
        let next = {
            let mut rx = receiver.lock().await;
            rx.recv().await
        };
        let Some(target) = next else {
            break;
        };

        stats.increment_processed();

        match source.fetch(&target).await {
            Ok(result) => sink.emit(&result),
            Err(e) => {
                stats.record_failure(e.kind());
                debug!("{}: {}", target, e);
            }
        }
    }

    debug!("Worker {} finished", id);
}

/// Handle on a running pool
pub struct PoolHandle {
    handles: Vec<JoinHandle<()>>,
    sink: Arc<ResultSink>,
    stats: StatsTracker,
}

impl PoolHandle {
    /// Wait for every worker to finish, flush output and report statistics
    pub async fn join(self) -> HarvestStats {
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Worker task failed: {}", e);
            }
        }

        self.sink.flush();
        match self.sink.unique_count() {
            Some(unique) => info!("{} ({} unique)", self.stats.summary(), unique),
            None => info!("{}", self.stats.summary()),
        }

        self.stats.snapshot()
    }
}
