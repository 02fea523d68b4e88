//! Monochat Core - Monobank statement reports for chat and terminal
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Interval, TransactionRecord, CategoryTable, etc.)
//! - **ports**: Trait definitions for external dependencies (BankApi, KeyValueStore, EventLog)
//! - **services**: Business logic orchestration (date ranges, reports, chat routing)
//! - **adapters**: Concrete implementations (DuckDB, Monobank HTTP, in-memory)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
pub mod migrations;
pub mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::duckdb::DuckDbStore;
use adapters::monobank::MonobankClient;
use config::Config;
use ports::{BankApi, EventLog, KeyValueStore, MappingRepository};
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    CategoryMapping, CategoryTable, ClientInfo, GeneratedReport, Interval, ReportRow,
    TransactionRecord,
};
pub use domain::result::{Error, OperationResult};

/// Main context for Monochat operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, the event log, configuration, and all services.
pub struct MonochatContext {
    pub config: Config,
    pub store: Arc<DuckDbStore>,
    pub logger: Option<Arc<LoggingService>>,
    pub user_service: Arc<UserService>,
    pub mapping_service: Arc<MappingService>,
    pub transaction_service: Arc<TransactionService>,
    pub file_report_service: Arc<FileReportService>,
    pub client_info_service: Arc<ClientInfoService>,
    pub chat_service: ChatService,
}

impl MonochatContext {
    /// Create a new context rooted at `data_dir`
    pub fn new(data_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        let config = Config::load(data_dir)?;

        let store = Arc::new(DuckDbStore::new(&data_dir.join("monochat.duckdb"))?);
        store.ensure_schema()?;

        // The log is best effort; a locked logs.duckdb must not block commands
        let logger = LoggingService::new(data_dir, entry_point, env!("CARGO_PKG_VERSION"))
            .ok()
            .map(Arc::new);
        let log: Arc<dyn EventLog> = match &logger {
            Some(logger) => logger.clone() as Arc<dyn EventLog>,
            None => Arc::new(ports::NoopEventLog),
        };

        let bank = Arc::new(MonobankClient::new(
            &config.api_base_url,
            config.request_timeout_secs,
        )?);

        let mut context = Self::with_parts(store, bank, log, config)?;
        context.logger = logger;
        Ok(context)
    }

    /// Wire services over explicit collaborators
    pub fn with_parts(
        store: Arc<DuckDbStore>,
        bank: Arc<dyn BankApi>,
        log: Arc<dyn EventLog>,
        config: Config,
    ) -> Result<Self> {
        let generator = ReportGenerator::new(config.resolver()?);

        let kv: Arc<dyn KeyValueStore> = store.clone();
        let repository: Arc<dyn MappingRepository> = store.clone();

        let user_service = Arc::new(UserService::new(kv));
        let mapping_service = Arc::new(MappingService::new(repository, log.clone()));
        let transaction_service = Arc::new(TransactionService::new(
            bank.clone(),
            user_service.clone(),
            mapping_service.clone(),
            generator,
            log.clone(),
        ));
        let file_report_service = Arc::new(FileReportService::new(
            mapping_service.clone(),
            generator,
            log.clone(),
        ));
        let client_info_service = Arc::new(ClientInfoService::new(bank, user_service.clone()));
        let chat_service = ChatService::new(
            user_service.clone(),
            mapping_service.clone(),
            transaction_service.clone(),
            file_report_service.clone(),
            client_info_service.clone(),
            log,
        );

        Ok(Self {
            config,
            store,
            logger: None,
            user_service,
            mapping_service,
            transaction_service,
            file_report_service,
            client_info_service,
            chat_service,
        })
    }
}
