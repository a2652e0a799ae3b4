// Worker and connection arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use crate::constants::{DEFAULT_TIMEOUT, DEFAULT_TLS_PORT, DEFAULT_WORKERS};
use crate::utils::duration::parse_timeout;
use clap::Args;
use std::time::Duration;

/// Concurrency and connection options
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Number of concurrent workers
    #[arg(long = "threads", value_name = "N", default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Timeout for TCP connect plus TLS handshake (e.g. "500ms", "4s", "1m")
    #[arg(
        long = "timeout",
        value_name = "DURATION",
        default_value = "4s",
        value_parser = parse_timeout
    )]
    pub timeout: Duration,

    /// Port used for targets without an explicit one
    #[arg(long = "port", value_name = "PORT", default_value_t = DEFAULT_TLS_PORT)]
    pub port: u16,
}

impl Default for ConnectionArgs {
    fn default() -> Self {
        Self {
            threads: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            port: DEFAULT_TLS_PORT,
        }
    }
}
