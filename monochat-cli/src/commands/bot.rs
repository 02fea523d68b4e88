//! Bot command - feed chat messages through the command router
//!
//! Each message is either command text (`/month`, `/get 1-5`, ...) or
//! `@file <path>` to send a document. Without message arguments, messages
//! are read from stdin one per line.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use monochat_core::services::{EntryPoint, Incoming, Reply};
use monochat_core::MonochatContext;

use super::{open_context, write_report};
use crate::output;

const FILE_PREFIX: &str = "@file ";

pub fn run(chat_id: i64, out_dir: Option<PathBuf>, messages: Vec<String>) -> Result<()> {
    let ctx = open_context(EntryPoint::Bot)?;
    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    if !messages.is_empty() {
        for message in &messages {
            handle_line(&ctx, chat_id, message, &out_dir)?;
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        handle_line(&ctx, chat_id, &line, &out_dir)?;
    }
    Ok(())
}

fn handle_line(ctx: &MonochatContext, chat_id: i64, line: &str, out_dir: &Path) -> Result<()> {
    let reply = match line.strip_prefix(FILE_PREFIX) {
        Some(path) => {
            let path = Path::new(path.trim());
            let content = match std::fs::read(path) {
                Ok(content) => content,
                Err(e) => {
                    output::error(&format!("Can't read {}: {}", path.display(), e));
                    return Ok(());
                }
            };
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            ctx.chat_service.handle(
                chat_id,
                Incoming::Document {
                    file_name: &file_name,
                    content: &content,
                },
            )
        }
        None => ctx.chat_service.handle(chat_id, Incoming::Text(line)),
    };

    match reply {
        Reply::Text(text) => println!("{} {}", "bot>".cyan(), text.trim_end()),
        Reply::Document(report) => {
            let path = write_report(&report, Some(out_dir))?;
            println!(
                "{} sent {} ({} rows)",
                "bot>".cyan(),
                path.display(),
                report.rows
            );
        }
    }
    Ok(())
}
