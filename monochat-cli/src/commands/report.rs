//! Report commands - today, month and get <period>

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use monochat_core::services::Period;

use super::{get_context, resolve_user, write_report};
use crate::output;

#[derive(Serialize)]
struct ReportOutput {
    file: String,
    rows: usize,
}

pub fn run(period: Period, user: Option<Uuid>, output_path: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;

    let report = ctx.transaction_service.report(user_id, &period)?;
    let path = write_report(&report, output_path.as_deref())?;

    if json {
        return output::json_ok(ReportOutput {
            file: path.display().to_string(),
            rows: report.rows,
        });
    }

    output::success(&format!(
        "Wrote {} transactions to {}",
        report.rows,
        path.display()
    ));
    if report.rows == 0 {
        output::warning("No transactions in this period.");
    }
    Ok(())
}
