// Output filter and deduplication arguments
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0

use clap::Args;

/// Output selection options
///
/// At most one of `--wild-only`, `--no-wild` and `--all` may be given.
/// `--silent` selects like `--all` when used alone.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only print wildcard domains (*.example.com)
    #[arg(long = "wild-only")]
    pub wild_only: bool,

    /// Only print non-wildcard domains
    #[arg(long = "no-wild")]
    pub no_wild: bool,

    /// Print all domains (plain names, then wildcards)
    #[arg(long = "all")]
    pub all: bool,

    /// Print only domains; silences all logging except errors
    #[arg(long = "silent")]
    pub silent: bool,

    /// Only print each domain once across all hosts
    #[arg(long = "uniq")]
    pub uniq: bool,
}

impl FilterArgs {
    /// Number of mutually exclusive selection flags given
    pub fn selection_count(&self) -> usize {
        [self.wild_only, self.no_wild, self.all]
            .iter()
            .filter(|set| **set)
            .count()
    }
}
