// CertSift - Harvest domain names from TLS certificates
// Copyright (C) 2025 Marc Rivero (@seifreed)
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use certsift::{Args, Harvester, PipelineConfig, TargetSource};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Exit status after Ctrl-C, as a shell reports SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let args = Args::parse();

    // Logs go to stderr; stdout carries only domains
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or_else(|| args.log_level());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    args.validate()?;

    let Some(config) = PipelineConfig::from_args(&args) else {
        print_usage();
        return Ok(());
    };

    info!(
        "Starting with {} workers, timeout {:?}, filter {:?}{}",
        config.workers,
        config.timeout,
        config.filter,
        if config.dedup { ", unique" } else { "" }
    );

    let harvester = Harvester::new(config)?;
    let targets = TargetSource::from_args(&args);

    let stats = harvester
        .run_until(targets, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    // A pending stdin read would keep the runtime alive; output is already flushed
    if stats.interrupted {
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }

    Ok(())
}

/// Banner plus full help on stderr
fn print_usage() {
    eprintln!(
        "{}",
        "certsift - Extract domains from SSL certificates".cyan().bold()
    );
    eprintln!(
        "Usage: certsift --wild-only|--no-wild|--all|--silent [flags] [TARGET]... (or targets on stdin)\n"
    );

    let help = Args::command().render_help();
    eprintln!("{}", help);
}
