//! Chat command routing and dispatch
//!
//! [`route`] is pure: it only looks at the message. [`ChatService`] runs
//! the routed command against the services and turns the outcome into a
//! reply, so a transport only has to move bytes.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::GeneratedReport;
use crate::ports::{EventLog, LogEvent};
use crate::services::client_info::{render_summary, summarize, ClientInfoService};
use crate::services::file_report::FileReportService;
use crate::services::mapping::{MappingService, MAPPING_FILE_NAME};
use crate::services::transaction::{Period, TransactionService};
use crate::services::user::UserService;

/// Reply for anything that failed or was not understood
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Sorry, I can't process this message, view the logs or contact the owner of the service.";

/// Reply when a report is requested before an account is set
pub const ACCOUNT_MISSING_MESSAGE: &str = "Please set account.";

/// An incoming chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoming<'a> {
    Document { file_name: &'a str, content: &'a [u8] },
    Text(&'a str),
}

/// Where a message goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    MappingUpload { file_name: String },
    ConvertStatement { file_name: String },
    Report(Period),
    SetToken(String),
    SetAccount(String),
    Info,
    LinkUser(String),
    Unknown,
}

impl Route {
    pub fn command(&self) -> &'static str {
        match self {
            Route::MappingUpload { .. } => "mapping",
            Route::ConvertStatement { .. } => "convert",
            Route::Report(period) => period.command(),
            Route::SetToken(_) => "token",
            Route::SetAccount(_) => "account",
            Route::Info => "info",
            Route::LinkUser(_) => "user",
            Route::Unknown => "unknown",
        }
    }
}

pub fn route(message: &Incoming<'_>) -> Route {
    match message {
        Incoming::Document { file_name, .. } if *file_name == MAPPING_FILE_NAME => {
            Route::MappingUpload {
                file_name: file_name.to_string(),
            }
        }
        Incoming::Document { file_name, .. } => Route::ConvertStatement {
            file_name: file_name.to_string(),
        },
        Incoming::Text(text) => route_command(text),
    }
}

fn route_command(text: &str) -> Route {
    let Some(rest) = text.trim_start().strip_prefix('/') else {
        return Route::Unknown;
    };

    let (command, args) = match rest.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim().to_string()),
        None => (rest, String::new()),
    };
    // `/get@my_bot 1-5` addresses a specific bot in group chats
    let command = command.split('@').next().unwrap_or(command);

    match command {
        "get" => Route::Report(Period::Range(args)),
        "today" => Route::Report(Period::Today),
        "month" => Route::Report(Period::Month),
        "token" => Route::SetToken(args),
        "account" => Route::SetAccount(args),
        "info" => Route::Info,
        "user" => Route::LinkUser(args),
        _ => Route::Unknown,
    }
}

/// What the bot sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Document(GeneratedReport),
}

pub struct ChatService {
    users: Arc<UserService>,
    mappings: Arc<MappingService>,
    transactions: Arc<TransactionService>,
    file_reports: Arc<FileReportService>,
    client_info: Arc<ClientInfoService>,
    log: Arc<dyn EventLog>,
}

impl ChatService {
    pub fn new(
        users: Arc<UserService>,
        mappings: Arc<MappingService>,
        transactions: Arc<TransactionService>,
        file_reports: Arc<FileReportService>,
        client_info: Arc<ClientInfoService>,
        log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            users,
            mappings,
            transactions,
            file_reports,
            client_info,
            log,
        }
    }

    pub fn handle(&self, chat_id: i64, message: Incoming<'_>) -> Reply {
        self.handle_at(chat_id, message, Utc::now())
    }

    /// Route and execute. Failures are logged and answered with a generic
    /// message; details never reach the chat.
    pub fn handle_at(&self, chat_id: i64, message: Incoming<'_>, now: DateTime<Utc>) -> Reply {
        let route = route(&message);
        let content = match message {
            Incoming::Document { content, .. } => content,
            Incoming::Text(_) => &[][..],
        };

        match self.execute(chat_id, &route, content, now) {
            Ok(reply) => reply,
            Err(e) => {
                self.log.record(
                    LogEvent::new("command_failed")
                        .with_command(route.command())
                        .with_user(chat_id)
                        .with_error(e.to_string()),
                );
                Reply::Text(DEFAULT_ERROR_MESSAGE.to_string())
            }
        }
    }

    fn execute(
        &self,
        chat_id: i64,
        route: &Route,
        content: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Reply> {
        match route {
            Route::Unknown => Err(Error::validation("unrecognized message")),
            Route::LinkUser(user_id) => {
                self.users.link_chat_str(chat_id, user_id)?;
                Ok(Reply::Text("successfully set ChatUser ID".to_string()))
            }
            Route::MappingUpload { file_name } => {
                let user_id = self.users.user_for_chat(chat_id)?;
                self.mappings.upload(user_id, file_name, content)?;
                Ok(Reply::Text("mapping successfully loaded".to_string()))
            }
            Route::ConvertStatement { file_name } => {
                let user_id = self.users.user_for_chat(chat_id)?;
                let report = self.file_reports.convert(user_id, file_name, content)?;
                Ok(Reply::Document(report))
            }
            Route::Report(period) => {
                let user_id = self.users.user_for_chat(chat_id)?;
                match self.users.get_account(user_id) {
                    Err(e) if e.is_not_found() => {
                        return Ok(Reply::Text(ACCOUNT_MISSING_MESSAGE.to_string()))
                    }
                    Err(e) => return Err(e),
                    Ok(_) => {}
                }
                let report = self.transactions.report_at(user_id, period, now)?;
                Ok(Reply::Document(report))
            }
            Route::SetToken(token) => {
                let user_id = self.users.user_for_chat(chat_id)?;
                self.users.set_token(user_id, token)?;
                Ok(Reply::Text("successfully set token".to_string()))
            }
            Route::SetAccount(account) => {
                let user_id = self.users.user_for_chat(chat_id)?;
                self.users.set_account(user_id, account)?;
                Ok(Reply::Text("successfully set account".to_string()))
            }
            Route::Info => {
                let user_id = self.users.user_for_chat(chat_id)?;
                let info = self.client_info.get(user_id)?;
                Ok(Reply::Text(render_summary(&summarize(&info))))
            }
        }
    }
}
