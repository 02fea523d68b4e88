//! File report service - conversion of uploaded statement files

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::GeneratedReport;
use crate::ports::{EventLog, LogEvent};
use crate::services::date::CSV_SUFFIX;
use crate::services::mapping::MappingService;
use crate::services::report::{write_report, ReportGenerator};

pub struct FileReportService {
    mappings: Arc<MappingService>,
    generator: ReportGenerator,
    log: Arc<dyn EventLog>,
}

impl FileReportService {
    pub fn new(
        mappings: Arc<MappingService>,
        generator: ReportGenerator,
        log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            mappings,
            generator,
            log,
        }
    }

    pub fn validate(&self, file_name: &str) -> Result<()> {
        if !file_name.ends_with(CSV_SUFFIX) {
            return Err(Error::validation(
                "statements can only be converted from .csv files",
            ));
        }
        Ok(())
    }

    /// Filter and relabel a statement export. The period comes from the
    /// file name; the result keeps that name.
    pub fn convert(&self, user_id: Uuid, file_name: &str, content: &[u8]) -> Result<GeneratedReport> {
        self.validate(file_name)?;

        let table = self.mappings.load(user_id);
        let rows = self
            .generator
            .statement_rows(file_name, content, table.as_ref())?;
        let content = write_report(&rows)?;

        self.log.record(
            LogEvent::new("statement_converted")
                .with_command("convert")
                .with_user(user_id),
        );

        Ok(GeneratedReport {
            file_name: file_name.to_string(),
            content,
            rows: rows.len(),
        })
    }
}
