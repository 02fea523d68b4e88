//! Client info service - account overview for the `/info` command

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::ClientInfo;
use crate::ports::BankApi;
use crate::services::user::UserService;

/// One line of the account overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: String,
    pub currency_code: i32,
    pub balance: Decimal,
    pub account_type: String,
}

pub struct ClientInfoService {
    bank: Arc<dyn BankApi>,
    users: Arc<UserService>,
}

impl ClientInfoService {
    pub fn new(bank: Arc<dyn BankApi>, users: Arc<UserService>) -> Self {
        Self { bank, users }
    }

    pub fn get(&self, user_id: Uuid) -> Result<ClientInfo> {
        let token = self.users.get_token(user_id)?;
        self.bank.get_client_info(&token)
    }

    pub fn summary(&self, user_id: Uuid) -> Result<Vec<AccountSummary>> {
        Ok(summarize(&self.get(user_id)?))
    }
}

pub fn summarize(info: &ClientInfo) -> Vec<AccountSummary> {
    info.accounts
        .iter()
        .map(|account| AccountSummary {
            id: account.id.clone(),
            currency_code: account.currency_code,
            balance: account.balance_decimal(),
            account_type: account.account_type.clone(),
        })
        .collect()
}

/// Plain-text rendering used as the chat reply
pub fn render_summary(accounts: &[AccountSummary]) -> String {
    let mut out = String::new();
    for account in accounts {
        out.push_str(&format!("id: {}\n", account.id));
        out.push_str(&format!("    currency code: {}\n", account.currency_code));
        out.push_str(&format!("    balance: {}\n", account.balance));
        out.push_str(&format!("    type: {}\n\n", account.account_type));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::ClientAccount;
    use crate::services::testing::FakeBank;

    fn info() -> ClientInfo {
        ClientInfo {
            client_id: "3MSaMMtczs".into(),
            name: "Test User".into(),
            accounts: vec![ClientAccount {
                id: "kKGVoZuHWzqVoZuH".into(),
                currency_code: 980,
                balance: 1234567,
                account_type: "black".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_summary_uses_stored_token() {
        let store = Arc::new(MemoryStore::new());
        let users = Arc::new(UserService::new(store));
        let user = Uuid::new_v4();
        users.set_token(user, "secret").unwrap();

        let bank = Arc::new(FakeBank::with_client_info(info()));
        let service = ClientInfoService::new(bank.clone(), users);

        let summary = service.summary(user).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].balance.to_string(), "12345.67");
        assert_eq!(bank.tokens(), vec!["secret"]);
    }

    #[test]
    fn test_summary_without_token() {
        let users = Arc::new(UserService::new(Arc::new(MemoryStore::new())));
        let service = ClientInfoService::new(Arc::new(FakeBank::default()), users);
        assert!(service.summary(Uuid::new_v4()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&summarize(&info()));
        assert_eq!(
            text,
            "id: kKGVoZuHWzqVoZuH\n    currency code: 980\n    balance: 12345.67\n    type: black\n\n"
        );
    }
}
