//! Mapping command - upload a category table
//!
//! The file has three columns and no header: bank category code,
//! description, target label. An empty description makes a code-only rule.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use uuid::Uuid;

use monochat_core::CategoryMapping;

use super::{get_context, resolve_user};
use crate::output;

pub fn run(file: &Path, user: Option<Uuid>, show: bool, json: bool) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", file.display()))?;
    let content =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let ctx = get_context()?;
    let user_id = resolve_user(&ctx, user)?;

    let table = ctx.mapping_service.upload(user_id, file_name, &content)?;

    let mut rules: Vec<&CategoryMapping> = table.iter().collect();
    rules.sort_by(|a, b| a.key().cmp(&b.key()));

    if json {
        return output::json_ok(rules);
    }

    output::success(&format!("Loaded {} category rules", table.len()));

    if show && !rules.is_empty() {
        let mut display = output::create_table();
        display.set_header(vec!["Code", "Description", "Label"]);
        for rule in rules {
            let description = if rule.source_description.is_empty() {
                "(any)".dimmed().to_string()
            } else {
                rule.source_description.clone()
            };
            display.add_row(vec![
                rule.source_code.clone(),
                description,
                rule.target_label.clone(),
            ]);
        }
        println!("{}", display);
    }
    Ok(())
}
