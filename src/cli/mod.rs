// CLI module - Command line interface and argument parsing
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use crate::scanner::config::FilterMode;

mod connection_args;
mod filter_args;

pub use connection_args::ConnectionArgs;
pub use filter_args::FilterArgs;

/// CertSift - Extract domains from SSL certificates
///
/// Targets are taken from positional arguments, else from `--file`, else
/// from standard input (one per line). A filter mode is required; without
/// one the help is printed and nothing is scanned.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "certsift")]
#[command(about = "Extract domains from SSL certificates", long_about = None)]
#[command(version)]
pub struct Args {
    /// Hosts, IPs or URLs to scan (host, host:port, https://host/path)
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Read targets from a file, one per line
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Log per-host failures to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl Args {
    /// Validate argument combinations
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.filter.selection_count() > 1 {
            anyhow::bail!("--wild-only, --no-wild and --all are mutually exclusive");
        }

        if self.connection.threads == 0 {
            anyhow::bail!("--threads must be at least 1");
        }

        Ok(())
    }

    /// Selected output filter, or `None` when no mode flag was given
    pub fn filter_mode(&self) -> Option<FilterMode> {
        let filter = &self.filter;
        if filter.wild_only {
            Some(FilterMode::WildcardsOnly)
        } else if filter.no_wild {
            Some(FilterMode::NonWildcardsOnly)
        } else if filter.all {
            Some(FilterMode::All)
        } else if filter.silent {
            Some(FilterMode::Silent)
        } else {
            None
        }
    }

    /// Log level used when `RUST_LOG` is not set
    pub fn log_level(&self) -> Level {
        if self.filter.silent {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_mode_selected() {
        let args = Args::parse_from(["certsift", "example.com"]);
        assert_eq!(args.filter_mode(), None);
        assert_eq!(args.targets, vec!["example.com"]);
    }

    #[test]
    fn test_each_mode_flag() {
        let cases = [
            ("--wild-only", FilterMode::WildcardsOnly),
            ("--no-wild", FilterMode::NonWildcardsOnly),
            ("--all", FilterMode::All),
            ("--silent", FilterMode::Silent),
        ];
        for (flag, mode) in cases {
            let args = Args::parse_from(["certsift", flag]);
            assert!(args.validate().is_ok());
            assert_eq!(args.filter_mode(), Some(mode));
        }
    }

    #[test]
    fn test_silent_with_mode_keeps_mode() {
        let args = Args::parse_from(["certsift", "--silent", "--wild-only"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.filter_mode(), Some(FilterMode::WildcardsOnly));
        assert_eq!(args.log_level(), Level::ERROR);
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        let args = Args::parse_from(["certsift", "--wild-only", "--no-wild"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["certsift", "--all", "--no-wild"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let args = Args::parse_from(["certsift", "--all", "--threads", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        let args = Args::parse_from(["certsift", "--all", "--timeout", "1.5s"]);
        assert_eq!(args.connection.timeout, Duration::from_millis(1500));

        assert!(Args::try_parse_from(["certsift", "--all", "--timeout", "0s"]).is_err());
        assert!(Args::try_parse_from(["certsift", "--all", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["certsift", "--all"]);
        assert_eq!(args.connection.threads, 100);
        assert_eq!(args.connection.timeout, Duration::from_secs(4));
        assert_eq!(args.connection.port, 443);
        assert!(!args.filter.uniq);
        assert_eq!(args.input_file, None);
        assert_eq!(args.log_level(), Level::WARN);
    }

    #[test]
    fn test_verbose_and_file() {
        let args = Args::parse_from(["certsift", "--no-wild", "-v", "-f", "hosts.txt"]);
        assert_eq!(args.log_level(), Level::DEBUG);
        assert_eq!(args.input_file, Some(PathBuf::from("hosts.txt")));
    }
}
