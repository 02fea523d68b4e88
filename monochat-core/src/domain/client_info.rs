//! Client information from the personal API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<ClientAccount>,
}

/// A card or account owned by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccount {
    pub id: String,
    /// ISO 4217 numeric code
    pub currency_code: i32,
    #[serde(default)]
    pub cashback_type: Option<String>,
    /// Minor units
    pub balance: i64,
    #[serde(default)]
    pub credit_limit: i64,
    #[serde(default)]
    pub masked_pan: Vec<String>,
    #[serde(rename = "type", default)]
    pub account_type: String,
}

impl ClientAccount {
    pub fn balance_decimal(&self) -> Decimal {
        Decimal::new(self.balance, 2)
    }
}
