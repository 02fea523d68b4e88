//! Core domain entities
//!
//! Pure data structures with their validation and lookup logic - no I/O.

pub mod category;
mod client_info;
pub mod interval;
pub mod report;
pub mod result;
mod transaction;
mod user;

pub use category::{resolve_category, CategoryMapping, CategoryTable};
pub use client_info::{ClientAccount, ClientInfo};
pub use interval::{Interval, Truncation};
pub use report::{GeneratedReport, ReportHeader, ReportRow};
pub use transaction::TransactionRecord;
pub use user::StoreKey;
