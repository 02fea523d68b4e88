//! Monochat CLI - Monobank statement reports in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;
mod output;

use commands::{account, bot, convert, info, logs, mapping, report, resolve, token, user};
use monochat_core::services::Period;

/// Monochat - Monobank statement reports in your terminal
#[derive(Parser)]
#[command(name = "monochat", version, about, long_about = None)]
struct Cli {
    /// User to act for (defaults to the one chosen with `monochat user`)
    #[arg(long, global = true, env = "MONOCHAT_USER")]
    user: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report for a period: `1-5`, `01.03.2024-05.03.2024` or
    /// `01.03.2024T10.00-05.03.2024T18.30`
    Get {
        period: String,
        /// File or directory to write the report to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report for the current day
    Today {
        /// File or directory to write the report to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report for the current month
    Month {
        /// File or directory to write the report to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a statement export; the period is read from the file name
    Convert {
        /// Statement CSV, e.g. 01.08.2019T00.00-05.08.2019T23.59.csv
        file: PathBuf,
        /// File or directory to write the report to
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a category mapping (code,description,label)
    Mapping {
        /// Path to the mapping CSV
        file: PathBuf,
        /// Print the loaded rules
        #[arg(long)]
        show: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store the Monobank personal token (prompts when omitted)
    Token {
        token: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the account statements are fetched from, or show it
    Account {
        account: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts available to the stored token
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a user and make it the default (new id when omitted)
    User {
        id: Option<Uuid>,
        /// Also link this chat to the user
        #[arg(long)]
        chat_id: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the interval a period string resolves to
    Resolve {
        period: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Route chat messages through the bot (stdin when none are given)
    Bot {
        /// Chat the messages come from
        #[arg(long)]
        chat_id: i64,
        /// Directory for documents the bot sends back
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Messages, e.g. "/month" or "@file statement.csv"
        messages: Vec<String>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let user_id = cli.user;
    match cli.command {
        Commands::Get { period, output, json } => {
            report::run(Period::Range(period), user_id, output, json)
        }
        Commands::Today { output, json } => report::run(Period::Today, user_id, output, json),
        Commands::Month { output, json } => report::run(Period::Month, user_id, output, json),
        Commands::Convert { file, output, json } => convert::run(&file, user_id, output, json),
        Commands::Mapping { file, show, json } => mapping::run(&file, user_id, show, json),
        Commands::Token { token, json } => token::run(token, user_id, json),
        Commands::Account { account, json } => account::run(account, user_id, json),
        Commands::Info { json } => info::run(user_id, json),
        Commands::User { id, chat_id, json } => user::run(id.or(user_id), chat_id, json),
        Commands::Resolve { period, json } => resolve::run(&period, json),
        Commands::Bot { chat_id, out_dir, messages } => bot::run(chat_id, out_dir, messages),
        Commands::Logs { command } => logs::run(command),
    }
}
