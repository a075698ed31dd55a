//! Launching the extraction job from the server.
//!
//! The job runs as a separate OS process working from the site root with
//! root-relative paths, exactly as it would from the command line or cron.
//! The create handler waits for it to finish but treats any failure as
//! log-only.

use std::path::PathBuf;

use anyhow::{bail, Context};
use tokio::process::Command;

use crate::config::Config;

/// Name of the companion extraction binary, expected next to the server
/// executable unless overridden in configuration.
const EXTRACT_BIN: &str = "pinboard-extract";

/// Run the extraction job over the current collection and wait for it.
pub async fn run_job(config: &Config) -> anyhow::Result<()> {
    let program = match &config.extraction.command {
        Some(command) => command.clone(),
        None => sibling_binary()?,
    };

    let paths = &config.paths;
    tracing::debug!(program = %program.display(), "Running extraction job");

    let status = Command::new(&program)
        .current_dir(&paths.root)
        .arg("--pins-file")
        .arg(paths.data_dir.join("pins.json"))
        .arg("--images-dir")
        .arg(&paths.images_dir)
        .status()
        .await
        .with_context(|| format!("running {}", program.display()))?;

    if !status.success() {
        bail!("extraction job exited with {}", status);
    }

    Ok(())
}

/// Locate the extraction binary installed next to the current executable.
fn sibling_binary() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("resolving current executable")?;
    let dir = exe.parent().context("executable has no parent directory")?;
    Ok(dir.join(EXTRACT_BIN))
}
