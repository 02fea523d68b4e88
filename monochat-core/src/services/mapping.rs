//! Mapping service - upload and lookup of per-user category tables

use std::sync::Arc;

use csv::ReaderBuilder;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{CategoryMapping, CategoryTable, StoreKey};
use crate::ports::{EventLog, LogEvent, MappingRepository};

/// File name that marks an upload as a mapping table
pub const MAPPING_FILE_NAME: &str = "mapping.csv";

/// Width of a mapping file row: code, description, label
pub const MAPPING_COLUMNS: usize = 3;

pub struct MappingService {
    store: Arc<dyn MappingRepository>,
    log: Arc<dyn EventLog>,
}

impl MappingService {
    pub fn new(store: Arc<dyn MappingRepository>, log: Arc<dyn EventLog>) -> Self {
        Self { store, log }
    }

    /// Only CSV files are accepted
    pub fn validate(&self, file_name: &str) -> Result<()> {
        if !file_name.ends_with(".csv") {
            return Err(Error::validation(format!(
                "mapping file must be a .csv file, got '{file_name}'"
            )));
        }
        Ok(())
    }

    /// Parse an uploaded table and store it for `user_id`, replacing any
    /// previous one
    pub fn parse(&self, user_id: Uuid, content: &[u8]) -> Result<CategoryTable> {
        let table = parse_mapping(content)?;
        self.store
            .set_mapping(&StoreKey::Mapping(user_id).to_string(), &table)?;

        self.log.record(
            LogEvent::new("mapping_loaded")
                .with_command("mapping")
                .with_user(user_id),
        );

        Ok(table)
    }

    /// Validate the name, then [`parse`](Self::parse)
    pub fn upload(&self, user_id: Uuid, file_name: &str, content: &[u8]) -> Result<CategoryTable> {
        self.validate(file_name)?;
        self.parse(user_id, content)
    }

    /// The user's table, if any. A store failure is logged and reported as
    /// no mapping so a report can still be produced with raw codes.
    pub fn load(&self, user_id: Uuid) -> Option<CategoryTable> {
        match self.store.get_mapping(&StoreKey::Mapping(user_id).to_string()) {
            Ok(table) => table,
            Err(e) => {
                self.log.record(
                    LogEvent::new("mapping_lookup_failed")
                        .with_user(user_id)
                        .with_error(e.to_string()),
                );
                None
            }
        }
    }
}

/// Read a headerless three-column table. Later rows replace earlier rows
/// with the same key.
pub fn parse_mapping(content: &[u8]) -> Result<CategoryTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut table = CategoryTable::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::format(format!("can't read file: {e}")))?;
        if record.len() != MAPPING_COLUMNS {
            return Err(Error::format(format!(
                "mapping row {} has {} columns, expected {}",
                index + 1,
                record.len(),
                MAPPING_COLUMNS
            )));
        }
        table.insert(CategoryMapping::new(&record[0], &record[1], &record[2]));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::services::testing::{FailingStore, RecordingLog};

    fn service() -> (MappingService, Arc<MemoryStore>, Arc<RecordingLog>) {
        let store = Arc::new(MemoryStore::new());
        let log = Arc::new(RecordingLog::default());
        let service = MappingService::new(store.clone(), log.clone());
        (service, store, log)
    }

    #[test]
    fn test_parse_mapping_keys() {
        let table = parse_mapping(b"5411,,Groceries\n5411,Silpo,Food: Silpo\n").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("5411").is_some());
        assert!(table.get("5411Silpo").is_some());
    }

    #[test]
    fn test_parse_mapping_later_row_wins() {
        let table = parse_mapping(b"4111,,Transport\n4111,,Taxi\n").unwrap();
        assert_eq!(table.resolve("4111", "Uber"), Some("Taxi"));
    }

    #[test]
    fn test_parse_mapping_wrong_width() {
        for content in [&b"4111,Transport\n"[..], &b"4111,,Transport,extra\n"[..]] {
            let err = parse_mapping(content).unwrap_err();
            assert!(matches!(err, Error::Format(_)));
        }
    }

    #[test]
    fn test_validate_requires_csv() {
        let (service, _, _) = service();
        assert!(service.validate("mapping.csv").is_ok());
        assert!(matches!(service.validate("mapping.xlsx"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_upload_stores_under_user_key() {
        let (service, store, log) = service();
        let user = Uuid::new_v4();

        service.upload(user, "mapping.csv", b"5411,,Groceries\n").unwrap();

        let stored = store
            .get_mapping(&format!("mapping_{user}"))
            .unwrap()
            .unwrap();
        assert_eq!(stored.resolve("5411", "ATB"), Some("Groceries"));
        assert_eq!(log.names(), vec!["mapping_loaded"]);
        assert_eq!(service.load(user), Some(stored));
    }

    #[test]
    fn test_load_absent_is_none() {
        let (service, _, log) = service();
        assert_eq!(service.load(Uuid::new_v4()), None);
        assert!(log.names().is_empty());
    }

    #[test]
    fn test_load_failure_is_logged_and_ignored() {
        let log = Arc::new(RecordingLog::default());
        let service = MappingService::new(Arc::new(FailingStore), log.clone());

        assert_eq!(service.load(Uuid::new_v4()), None);
        assert_eq!(log.names(), vec!["mapping_lookup_failed"]);
        assert!(log.events()[0].error_message.is_some());
    }
}
