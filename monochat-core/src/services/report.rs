//! Report generation
//!
//! Both paths emit the same five-column CSV document:
//!
//! - live: transactions fetched from the bank, every record included
//! - statement: a ten-column export, filtered by the interval encoded in
//!   the file name

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::domain::report::{normalize_description, REPORT_DATETIME_FORMAT};
use crate::domain::result::{Error, Result};
use crate::domain::{resolve_category, CategoryTable, Interval, ReportHeader, ReportRow, TransactionRecord};
use crate::services::date::DateRangeResolver;

/// Width of the bank statement export
pub const STATEMENT_COLUMNS: usize = 10;

const DATE_COLUMN: usize = 0;
const DESCRIPTION_COLUMN: usize = 1;
const CATEGORY_COLUMN: usize = 2;
const AMOUNT_COLUMN: usize = 3;

/// Produces report CSV from transactions or statement files
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerator {
    resolver: DateRangeResolver,
}

impl ReportGenerator {
    pub fn new(resolver: DateRangeResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &DateRangeResolver {
        &self.resolver
    }

    /// Format transactions as report rows, in source order
    pub fn transaction_rows(
        &self,
        transactions: &[TransactionRecord],
        table: Option<&CategoryTable>,
    ) -> Result<Vec<ReportRow>> {
        let tz = self.resolver.timezone();

        transactions
            .iter()
            .map(|tx| {
                let at = tx.timestamp_in(&tz).ok_or_else(|| {
                    Error::parse(tx.time.to_string(), "timestamp out of range")
                })?;
                let code = tx.mcc.to_string();
                let description = normalize_description(&tx.description);

                Ok(ReportRow {
                    date: at.format(REPORT_DATETIME_FORMAT).to_string(),
                    category: resolve_category(table, &code, &description)
                        .map(str::to_string)
                        .unwrap_or_else(|| code.clone()),
                    description,
                    bank_category: code,
                    amount: tx.amount_decimal().to_string(),
                })
            })
            .collect()
    }

    /// Live path: no interval filtering
    pub fn from_transactions(
        &self,
        transactions: &[TransactionRecord],
        table: Option<&CategoryTable>,
    ) -> Result<Vec<u8>> {
        let rows = self.transaction_rows(transactions, table)?;
        write_report(&rows)
    }

    /// Statement path: the interval comes from `file_name`
    pub fn from_statement(
        &self,
        file_name: &str,
        content: &[u8],
        table: Option<&CategoryTable>,
    ) -> Result<Vec<u8>> {
        let rows = self.statement_rows(file_name, content, table)?;
        write_report(&rows)
    }

    /// Read, validate and filter a statement without writing it
    pub fn statement_rows(
        &self,
        file_name: &str,
        content: &[u8],
        table: Option<&CategoryTable>,
    ) -> Result<Vec<ReportRow>> {
        let records = read_statement(content)?;
        let interval = self.resolver.resolve(file_name)?;
        self.convert_statement(&interval, &records, table)
    }

    /// Filter already-validated statement records through `interval`
    pub fn convert_statement(
        &self,
        interval: &Interval,
        records: &[StringRecord],
        table: Option<&CategoryTable>,
    ) -> Result<Vec<ReportRow>> {
        let mut rows = Vec::new();

        for record in records {
            let date = &record[DATE_COLUMN];
            let local = NaiveDateTime::parse_from_str(date, REPORT_DATETIME_FORMAT)
                .map_err(|e| Error::parse(date, e))?;
            let at = self.resolver.localize(local)?;

            if !interval.contains(at) {
                continue;
            }

            let code = record[CATEGORY_COLUMN].to_string();
            let description = normalize_description(&record[DESCRIPTION_COLUMN]);

            rows.push(ReportRow {
                date: date.to_string(),
                category: resolve_category(table, &code, &description)
                    .map(str::to_string)
                    .unwrap_or_else(|| code.clone()),
                description,
                bank_category: code,
                amount: record[AMOUNT_COLUMN].to_string(),
            });
        }

        Ok(rows)
    }
}

/// Parse a headerless statement, rejecting any row that is not exactly
/// [`STATEMENT_COLUMNS`] wide
pub fn read_statement(content: &[u8]) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::format(format!("can't read file: {e}")))?;
        if record.len() != STATEMENT_COLUMNS {
            return Err(Error::format(format!(
                "row {} has {} columns, expected {}",
                index + 1,
                record.len(),
                STATEMENT_COLUMNS
            )));
        }
        records.push(record);
    }

    Ok(records)
}

/// Header plus rows, `\n` terminated, quoting only where needed
pub fn write_report(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(ReportHeader::record())?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Encoding(e.to_string()))
}
