// Scanner module - Harvesting pipeline
//
// Wires a target source, the worker pool and the result sink together and
// runs them until the input is exhausted or a shutdown is requested.

pub mod config;
pub mod pool;
pub mod stats;

pub use config::{FilterMode, PipelineConfig};
pub use pool::{PoolHandle, TargetQueue, WorkerPool};
pub use stats::{HarvestStats, StatsTracker};

use crate::Result;
use crate::certificates::{CertificateFetcher, CertificateSource};
use crate::input::TargetSource;
use crate::output::ResultSink;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// One harvesting run
pub struct Harvester {
    config: PipelineConfig,
    source: Arc<dyn CertificateSource>,
    sink: Arc<ResultSink>,
    stats: StatsTracker,
}

impl Harvester {
    /// Harvest over TLS and print to standard output
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = CertificateFetcher::from_config(&config)?;
        let stats = StatsTracker::new();
        let sink = ResultSink::stdout(&config, stats.clone());

        Ok(Self::with_parts(config, Arc::new(fetcher), Arc::new(sink), stats))
    }

    /// Assemble a harvester from explicit parts
    pub fn with_parts(
        config: PipelineConfig,
        source: Arc<dyn CertificateSource>,
        sink: Arc<ResultSink>,
        stats: StatsTracker,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            stats,
        }
    }

    /// Run until every target has been processed
    pub async fn run(self, targets: TargetSource) -> Result<HarvestStats> {
        self.run_until(targets, std::future::pending()).await
    }

    /// Run until every target has been processed or `shutdown` resolves
    ///
    /// On shutdown no further targets are read; hosts already queued or in
    /// flight still finish within the connection timeout.
    pub async fn run_until<F>(self, targets: TargetSource, shutdown: F) -> Result<HarvestStats>
    where
        F: Future<Output = ()>,
    {
        let stats = self.stats.clone();
        let pool = WorkerPool::new(self.config.workers, self.source, self.sink, self.stats);
        let (queue, handle) = pool.start();
        let mut producer = tokio::spawn(targets.feed(queue));

        let fed = tokio::select! {
            biased;

            _ = shutdown => {
                warn!("Interrupted, finishing hosts already in flight");
                producer.abort();
                stats.mark_interrupted();
                None
            }
            result = &mut producer => Some(match result {
                Ok(fed) => fed,
                Err(e) => Err(anyhow::anyhow!("Target reader failed: {}", e)),
            }),
        };

        // Workers drain regardless of how input ended
        let summary = handle.join().await;

        if let Some(fed) = fed {
            let enqueued = fed?;
            debug!("Input exhausted after {} targets", enqueued);
        }

        Ok(summary)
    }
}
