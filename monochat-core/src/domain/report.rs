//! Normalized five-column report row

use serde::Serialize;

/// Date column format, `DD.MM.YYYY HH:MM:SS`
pub const REPORT_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Report columns, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportHeader {
    Date,
    Description,
    Category,
    BankCategory,
    Amount,
}

impl ReportHeader {
    pub const ALL: [ReportHeader; 5] = [
        ReportHeader::Date,
        ReportHeader::Description,
        ReportHeader::Category,
        ReportHeader::BankCategory,
        ReportHeader::Amount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportHeader::Date => "Date",
            ReportHeader::Description => "Description",
            ReportHeader::Category => "Category",
            ReportHeader::BankCategory => "Bank category",
            ReportHeader::Amount => "Amount",
        }
    }

    pub fn record() -> [&'static str; 5] {
        Self::ALL.map(|h| h.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub description: String,
    /// Mapped label, or the raw code when nothing matched
    pub category: String,
    /// Always the raw code
    pub bank_category: String,
    pub amount: String,
}

impl ReportRow {
    pub fn to_record(&self) -> [&str; 5] {
        [
            &self.date,
            &self.description,
            &self.category,
            &self.bank_category,
            &self.amount,
        ]
    }
}

/// Collapse embedded newlines to spaces
pub fn normalize_description(description: &str) -> String {
    description.replace('\n', " ")
}

/// A finished CSV document ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub file_name: String,
    pub content: Vec<u8>,
    /// Data rows, header excluded
    pub rows: usize,
}
