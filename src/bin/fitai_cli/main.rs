// ABOUTME: FitAI CLI - runs the adjustment engine against JSON fixtures from the command line
// ABOUTME: Inference pool stats, plan evaluation, automatic adjustment, and biometric checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Show which inference keys resolve for each task category
//! fitai-cli stats
//!
//! # Evaluate a user's last four weeks from a fixture
//! fitai-cli evaluate --fixture user.json
//!
//! # Evaluate and apply, as of a fixed date
//! fitai-cli adjust --fixture user.json --as-of 2025-03-01T08:00:00Z
//!
//! # Check the measurement reminder, or analyze the latest measurements
//! fitai-cli reminder --fixture user.json
//! fitai-cli analyze --fixture user.json
//! ```

mod commands;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fitai_engine::config::EngineConfig;
use fitai_engine::logging::{LogFormat, LoggingConfig};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fitai-cli",
    about = "FitAI adaptive plan engine CLI",
    long_about = "Run plan evaluation, automatic adjustment, and biometric checks against JSON fixtures using the in-memory store."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Fixture input shared by the data-driven commands
#[derive(clap::Args)]
struct FixtureArgs {
    /// Path to a user fixture (profile, logs, measurements, plans)
    #[arg(long)]
    fixture: PathBuf,

    /// Evaluate as of this RFC 3339 timestamp instead of now
    #[arg(long)]
    as_of: Option<DateTime<Utc>>,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show inference key availability and usage counters
    Stats,

    /// Evaluate whether the fixture user's plans need adjustment
    Evaluate {
        #[command(flatten)]
        input: FixtureArgs,

        /// Also print the weekly metrics the decision used
        #[arg(long)]
        show_metrics: bool,
    },

    /// Evaluate, apply, and print the adjusted plans
    Adjust {
        #[command(flatten)]
        input: FixtureArgs,
    },

    /// Check whether a body measurement is due
    Reminder {
        #[command(flatten)]
        input: FixtureArgs,
    },

    /// Analyze the latest body measurements against the baseline
    Analyze {
        #[command(flatten)]
        input: FixtureArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: if cli.verbose { "debug" } else { "warn" }.into(),
        format: LogFormat::Compact,
        ..LoggingConfig::from_env()
    };
    logging.init()?;

    let config = EngineConfig::from_env()?;
    debug!(?config.cycles, "Configuration loaded");

    match cli.command {
        Command::Stats => commands::stats(&config),
        Command::Evaluate {
            input,
            show_metrics,
        } => commands::evaluate(config, &input.fixture, input.as_of, show_metrics).await,
        Command::Adjust { input } => commands::adjust(config, &input.fixture, input.as_of).await,
        Command::Reminder { input } => {
            commands::reminder(&config, &input.fixture, input.as_of).await
        }
        Command::Analyze { input } => commands::analyze(&config, &input.fixture).await,
    }
}
