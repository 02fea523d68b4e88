//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod chat;
mod client_info;
pub mod date;
mod file_report;
pub mod logging;
pub mod mapping;
pub mod migration;
pub mod report;
pub mod transaction;
mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{route, ChatService, Incoming, Reply, Route};
pub use client_info::{render_summary, summarize, AccountSummary, ClientInfoService};
pub use date::{DateRangeResolver, PeriodFormat};
pub use file_report::FileReportService;
pub use logging::{EntryPoint, LogEntry, LoggingService};
pub use mapping::{parse_mapping, MappingService};
pub use migration::{MigrationResult, MigrationService};
pub use report::ReportGenerator;
pub use transaction::{report_file_name, Period, TransactionService};
pub use user::UserService;
