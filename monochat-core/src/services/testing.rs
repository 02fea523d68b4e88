//! Fakes shared by service unit tests

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::{CategoryTable, ClientInfo, TransactionRecord};
use crate::ports::{BankApi, EventLog, KeyValueStore, LogEvent, MappingRepository};

/// Keeps every recorded event
#[derive(Default)]
pub struct RecordingLog {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingLog {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.event).collect()
    }
}

impl EventLog for RecordingLog {
    fn record(&self, event: LogEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Every call fails with a store error
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::store("connection refused"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::store("connection refused"))
    }

    fn delete(&self, _key: &str) -> Result<bool> {
        Err(Error::store("connection refused"))
    }
}

impl MappingRepository for FailingStore {
    fn get_mapping(&self, _key: &str) -> Result<Option<CategoryTable>> {
        Err(Error::store("connection refused"))
    }

    fn set_mapping(&self, _key: &str, _table: &CategoryTable) -> Result<()> {
        Err(Error::store("connection refused"))
    }
}

pub type StatementCall = (String, String, DateTime<Utc>, DateTime<Utc>);

/// Canned bank responses plus a record of what was asked
#[derive(Default)]
pub struct FakeBank {
    transactions: Vec<TransactionRecord>,
    client_info: ClientInfo,
    failure: Mutex<Option<String>>,
    calls: Mutex<Vec<StatementCall>>,
    tokens: Mutex<Vec<String>>,
}

impl FakeBank {
    pub fn with_transactions(transactions: Vec<TransactionRecord>) -> Self {
        Self {
            transactions,
            ..Default::default()
        }
    }

    pub fn with_client_info(client_info: ClientInfo) -> Self {
        Self {
            client_info,
            ..Default::default()
        }
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<StatementCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::Api(message.clone())),
            None => Ok(()),
        }
    }
}

impl BankApi for FakeBank {
    fn get_transactions(
        &self,
        token: &str,
        account: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>> {
        self.check_failure()?;
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), account.to_string(), from, to));
        Ok(self.transactions.clone())
    }

    fn get_client_info(&self, token: &str) -> Result<ClientInfo> {
        self.check_failure()?;
        self.tokens.lock().unwrap().push(token.to_string());
        Ok(self.client_info.clone())
    }
}
