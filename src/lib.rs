// CertSift - Harvest domain names from TLS certificates
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

//! CertSift connects to many hosts concurrently, reads the leaf certificate
//! each one presents and prints the domain names it covers. Names come from
//! the Subject Alternative Name extension and the subject common name, split
//! into plain names and `*.` wildcards, optionally deduplicated across hosts.

pub mod certificates;
pub mod cli;
pub mod constants;
pub mod error;
pub mod input;
pub mod output;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use crate::certificates::{CertificateFetcher, CertificateResult, CertificateSource};
pub use crate::cli::Args;
pub use crate::error::FetchError;
pub use crate::input::TargetSource;
pub use crate::scanner::{FilterMode, Harvester, PipelineConfig};

/// Result type for CertSift operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for CertSift operations
pub use anyhow::Error;
