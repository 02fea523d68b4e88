//! Convert command - relabel and filter a statement export
//!
//! The period comes from the file name, e.g.
//! `01.08.2019T00.00-05.08.2019T23.59.csv`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use uuid::Uuid;

use super::{get_context, resolve_user, write_report};
use crate::output;

#[derive(Serialize)]
struct ConvertOutput {
    source: String,
    file: String,
    rows: usize,
}

pub fn run(file: &Path, user: Option<Uuid>, output_path: Option<PathBuf>, json: bool) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", file.display()))?;
    let content =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;

    let report = ctx.file_report_service.convert(user_id, file_name, &content)?;

    // Never overwrite the source with its own converted copy
    let output_path = output_path.unwrap_or_else(|| {
        PathBuf::from("converted").join(&report.file_name)
    });
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let path = write_report(&report, Some(&output_path))?;

    if json {
        return output::json_ok(ConvertOutput {
            source: file.display().to_string(),
            file: path.display().to_string(),
            rows: report.rows,
        });
    }

    output::success(&format!(
        "Converted {} rows from {} into {}",
        report.rows,
        file_name,
        path.display()
    ));
    Ok(())
}
