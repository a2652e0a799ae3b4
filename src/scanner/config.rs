//! Pipeline configuration extracted from CLI Args.
//!
//! Built once at startup and shared read-only by the worker pool, the
//! fetcher and the result sink. Nothing downstream reads the CLI directly.

use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT, DEFAULT_TLS_PORT, DEFAULT_WORKERS};

/// Which harvested names reach the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Only `*.` names
    WildcardsOnly,
    /// Only names without the wildcard prefix
    NonWildcardsOnly,
    /// Plain names followed by wildcards
    All,
    /// Same selection as `All`; also quiets logging
    Silent,
}

impl FilterMode {
    pub fn includes_plain(&self) -> bool {
        !matches!(self, FilterMode::WildcardsOnly)
    }

    pub fn includes_wildcards(&self) -> bool {
        !matches!(self, FilterMode::NonWildcardsOnly)
    }
}

/// Immutable snapshot of the pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Output selection
    pub filter: FilterMode,
    /// Suppress names already emitted
    pub dedup: bool,
    /// Number of concurrent workers (and queue capacity)
    pub workers: usize,
    /// Bound on TCP connect plus TLS handshake per host
    pub timeout: Duration,
    /// Port for targets without an explicit one
    pub port: u16,
}

impl PipelineConfig {
    /// Create configuration from CLI Args
    ///
    /// Returns `None` when no filter mode was selected; the caller shows usage
    /// instead of running the pipeline.
    pub fn from_args(args: &crate::cli::Args) -> Option<Self> {
        let filter = args.filter_mode()?;

        Some(Self {
            filter,
            dedup: args.filter.uniq,
            workers: args.connection.threads,
            timeout: args.connection.timeout,
            port: args.connection.port,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: FilterMode::All,
            dedup: false,
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            port: DEFAULT_TLS_PORT,
        }
    }
}
