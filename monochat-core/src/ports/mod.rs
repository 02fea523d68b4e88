//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. Services depend
//! only on these traits and receive implementations through their
//! constructors.

mod bank;
mod event_log;
mod store;

pub use bank::BankApi;
pub use event_log::{EventLog, LogEvent, NoopEventLog};
pub use store::{KeyValueStore, MappingRepository};
