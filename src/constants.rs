// CertSift - Harvest domain names from TLS certificates
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! Harvesting Constants
//!
//! Centralized defaults for the harvesting pipeline so the CLI, the pipeline
//! configuration and the tests agree on the same values.

use std::time::Duration;

/// Port dialed when a target carries no explicit port
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 100;

/// Default bound on TCP connect plus TLS handshake
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Prefix that marks a wildcard certificate name
pub const WILDCARD_PREFIX: &str = "*.";

/// URL schemes stripped from input targets, checked in this order
pub const STRIPPED_SCHEMES: &[&str] = &["https://", "http://"];
