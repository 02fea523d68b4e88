//! Transaction record as returned by the Monobank personal statement API

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minor currency units per major unit
const MINOR_UNITS_SCALE: u32 = 2;

/// A single statement item.
///
/// Amounts are signed minor units (kopiykas). Only `time`, `description`,
/// `mcc` and `amount` feed the report; the rest is carried for callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    /// Unix seconds
    pub time: i64,
    #[serde(default)]
    pub description: String,
    pub mcc: i32,
    #[serde(default)]
    pub original_mcc: Option<i32>,
    #[serde(default)]
    pub hold: bool,
    pub amount: i64,
    #[serde(default)]
    pub operation_amount: i64,
    #[serde(default)]
    pub currency_code: i32,
    #[serde(default)]
    pub commission_rate: i64,
    #[serde(default)]
    pub cashback_amount: i64,
    #[serde(default)]
    pub balance: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TransactionRecord {
    /// Transaction time in the given zone, `None` if out of range
    pub fn timestamp_in(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_opt(self.time, 0).single()
    }

    /// Signed amount in major units with two fraction digits
    pub fn amount_decimal(&self) -> Decimal {
        Decimal::new(self.amount, MINOR_UNITS_SCALE)
    }
}
