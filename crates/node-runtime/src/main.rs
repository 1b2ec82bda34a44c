//! # Quantum-Chain Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (chain file + environment)
//! 2. Initialize logging
//! 3. Build the fork registry and register the extra handlers
//! 4. Log the fork table
//!
//! With a path argument, the file is read as hex-encoded block bytes, the
//! block is inspected and its summary printed as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use node_runtime::telemetry::init_logging;
use node_runtime::{NodeConfig, NodeRuntime};

fn read_hex_file(path: &Path) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).with_context(|| format!("{} is not valid hex", path.display()))
}

fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    let runtime = NodeRuntime::new(config).context("failed to build runtime")?;
    runtime.log_fork_table();

    if let Some(path) = std::env::args().nth(1) {
        let raw = read_hex_file(Path::new(&path))?;
        info!(path = %path, bytes = raw.len(), "Inspecting block");

        let summary = runtime
            .inspect_block(&raw)
            .with_context(|| format!("failed to inspect block from {path}"))?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
