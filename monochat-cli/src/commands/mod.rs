//! CLI command implementations

pub mod account;
pub mod bot;
pub mod convert;
pub mod info;
pub mod logs;
pub mod mapping;
pub mod report;
pub mod resolve;
pub mod token;
pub mod user;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

use monochat_core::services::EntryPoint;
use monochat_core::{GeneratedReport, MonochatContext};

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MONOCHAT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".monochat"))
        .ok_or_else(|| anyhow!("Could not find home directory; set MONOCHAT_DIR"))
}

/// Open the context for a CLI command
pub fn get_context() -> Result<MonochatContext> {
    open_context(EntryPoint::Cli)
}

pub fn open_context(entry_point: EntryPoint) -> Result<MonochatContext> {
    let data_dir = get_data_dir()?;
    MonochatContext::new(&data_dir, entry_point).context("Failed to initialize monochat context")
}

/// `--user` if given, else the configured default user
pub fn resolve_user(ctx: &MonochatContext, user: Option<Uuid>) -> Result<Uuid> {
    user.or(ctx.config.default_user)
        .ok_or_else(|| anyhow!("No user selected. Run `monochat user` or pass --user."))
}

/// Write a generated report into `output`, which may be a directory or a
/// file path. Defaults to the report's own name in the current directory.
pub fn write_report(report: &GeneratedReport, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(path) if path.is_dir() => path.join(&report.file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&report.file_name),
    };
    std::fs::write(&path, &report.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
