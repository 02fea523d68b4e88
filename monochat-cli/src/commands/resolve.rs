//! Resolve command - show the interval a period string covers

use anyhow::Result;
use serde::Serialize;

use monochat_core::services::{report_file_name, PeriodFormat};

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct ResolvedPeriod {
    from: String,
    to: String,
    timezone: String,
    file_name: String,
}

pub fn run(period: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let resolver = ctx.config.resolver()?;
    let interval = resolver.resolve(period)?;

    let resolved = ResolvedPeriod {
        from: interval.from().to_rfc3339(),
        to: interval.to().to_rfc3339(),
        timezone: resolver.timezone().name().to_string(),
        file_name: report_file_name(&interval),
    };

    if json {
        return output::json_ok(resolved);
    }

    let grammar = period
        .trim()
        .split_once('-')
        .and_then(|(from, to)| PeriodFormat::classify(from, to));

    let mut table = output::create_table();
    table.add_row(vec!["From", resolved.from.as_str()]);
    table.add_row(vec!["To", resolved.to.as_str()]);
    table.add_row(vec!["Time zone", resolved.timezone.as_str()]);
    table.add_row(vec!["Report file", resolved.file_name.as_str()]);
    if let Some(grammar) = grammar {
        let name = format!("{:?}", grammar);
        table.add_row(vec!["Format", name.as_str()]);
    }
    println!("{}", table);
    Ok(())
}
