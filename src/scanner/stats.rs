// Harvest Statistics Tracker
//
// Counters shared by all workers and the sink; summarized once the pool drains

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Statistics for one harvesting run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Targets pulled from the queue and handed to the fetcher
    pub hosts_processed: u64,
    /// Targets whose fetch failed
    pub hosts_failed: u64,
    /// Failures by kind (timeout, refused, handshake, ...)
    pub failures_by_kind: HashMap<&'static str, u64>,
    /// Domain lines written
    pub domains_emitted: u64,
    /// Domains dropped because they were already emitted
    pub duplicates_suppressed: u64,
    /// Input reading was stopped by a shutdown request
    pub interrupted: bool,
}

/// Thread-safe statistics tracker
#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<Mutex<HarvestStats>>,
    started: Instant,
}

impl StatsTracker {
    /// Create a new statistics tracker
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Mutex::new(HarvestStats::default())),
            started: Instant::now(),
        }
    }

    /// Increment processed hosts
    pub fn increment_processed(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.hosts_processed += 1;
        }
    }

    /// Record a failed host
    pub fn record_failure(&self, kind: &'static str) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.hosts_failed += 1;
            *stats.failures_by_kind.entry(kind).or_insert(0) += 1;
        }
    }

    /// Increment emitted domains
    pub fn increment_emitted(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.domains_emitted += 1;
        }
    }

    /// Increment suppressed duplicates
    pub fn increment_duplicates(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.duplicates_suppressed += 1;
        }
    }

    /// Record that the run was stopped before input ended
    pub fn mark_interrupted(&self) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.interrupted = true;
        }
    }

    /// Copy of the current counters
    pub fn snapshot(&self) -> HarvestStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    /// Time since the tracker was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// One-line summary for the log
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        let mut failures: Vec<_> = stats.failures_by_kind.iter().collect();
        failures.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        let mut line = format!(
            "{} hosts processed ({} failed), {} domains emitted, {} duplicates suppressed in {:.2}s",
            stats.hosts_processed,
            stats.hosts_failed,
            stats.domains_emitted,
            stats.duplicates_suppressed,
            self.elapsed().as_secs_f64()
        );

        if !failures.is_empty() {
            let detail: Vec<String> = failures
                .iter()
                .map(|(kind, count)| format!("{}={}", kind, count))
                .collect();
            line.push_str(&format!(" [{}]", detail.join(", ")));
        }

        line
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
