//! Banking API port

use chrono::{DateTime, Utc};

use crate::domain::result::Result;
use crate::domain::{ClientInfo, TransactionRecord};

/// Source of statement data.
///
/// Implementations own their timeout and retry policy; errors are returned
/// unchanged to the caller.
pub trait BankApi: Send + Sync {
    /// Fetch statement items for `account` between `from` and `to` inclusive
    fn get_transactions(
        &self,
        token: &str,
        account: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>>;

    /// Fetch client and account information
    fn get_client_info(&self, token: &str) -> Result<ClientInfo>;
}
