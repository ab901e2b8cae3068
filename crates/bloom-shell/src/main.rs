//! # Bloom Shell
//!
//! Reads membership commands from stdin and answers on stdout. One filter
//! is built at startup and lives for the whole session; nothing is
//! persisted.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging (stderr)
//! 3. Build the filter
//! 4. Serve commands until EOF or `quit`

mod commands;
mod config;
mod telemetry;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use bloom_membership::{MembershipFilter, Metrics};
use tracing::info;

use crate::commands::{Outcome, Session};
use crate::config::ShellConfig;

fn main() -> Result<()> {
    let config = ShellConfig::from_env().context("Invalid shell configuration")?;
    telemetry::init_logging(&config).context("Failed to initialize logging")?;

    let metrics = Arc::new(Metrics::new());
    let filter = Arc::new(
        MembershipFilter::with_metrics(config.filter.clone(), metrics.clone())
            .context("Failed to build filter")?,
    );
    info!(
        size_bits = filter.size_bits(),
        hash_count = filter.hash_count(),
        "Bloom shell ready"
    );

    let session = Session::new(filter, metrics, config.json_output);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match session.execute_line(&line) {
            Outcome::Reply(text) => {
                writeln!(stdout, "{}", text)?;
                stdout.flush()?;
            }
            Outcome::Quit => break,
        }
    }

    info!("Bloom shell exiting");
    Ok(())
}
