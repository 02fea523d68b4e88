//! Transaction service - live statement reports

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::{GeneratedReport, Interval};
use crate::ports::{BankApi, EventLog, LogEvent};
use crate::services::date::format_bound;
use crate::services::mapping::MappingService;
use crate::services::report::{write_report, ReportGenerator};
use crate::services::user::UserService;

/// Which stretch of time a live report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// Beginning to end of the current day
    Today,
    /// Beginning to end of the current month
    Month,
    /// Any string the date resolver accepts
    Range(String),
}

impl Period {
    /// Command name used in logs
    pub fn command(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Month => "month",
            Period::Range(_) => "get",
        }
    }
}

pub struct TransactionService {
    bank: Arc<dyn BankApi>,
    users: Arc<UserService>,
    mappings: Arc<MappingService>,
    generator: ReportGenerator,
    log: Arc<dyn EventLog>,
}

impl TransactionService {
    pub fn new(
        bank: Arc<dyn BankApi>,
        users: Arc<UserService>,
        mappings: Arc<MappingService>,
        generator: ReportGenerator,
        log: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            bank,
            users,
            mappings,
            generator,
            log,
        }
    }

    /// Resolve `period` against `now`
    pub fn bounds_at(&self, period: &Period, now: DateTime<Utc>) -> Result<Interval> {
        let resolver = self.generator.resolver();
        match period {
            Period::Today => resolver.today_at(now),
            Period::Month => resolver.month_at(now),
            Period::Range(value) => resolver.resolve_at(value, now),
        }
    }

    pub fn report(&self, user_id: Uuid, period: &Period) -> Result<GeneratedReport> {
        self.report_at(user_id, period, Utc::now())
    }

    /// Fetch the user's statement for `period` and format it. Every fetched
    /// record is included; the bank already applied the bounds.
    pub fn report_at(
        &self,
        user_id: Uuid,
        period: &Period,
        now: DateTime<Utc>,
    ) -> Result<GeneratedReport> {
        let interval = self.bounds_at(period, now)?;

        let token = self.users.get_token(user_id)?;
        let account = self.users.get_account(user_id)?;

        let transactions = self.bank.get_transactions(
            &token,
            &account,
            interval.from().with_timezone(&Utc),
            interval.to().with_timezone(&Utc),
        )?;

        self.log.record(
            LogEvent::new("transactions_fetched")
                .with_command(period.command())
                .with_user(user_id),
        );

        let table = self.mappings.load(user_id);
        let rows = self.generator.transaction_rows(&transactions, table.as_ref())?;
        let content = write_report(&rows)?;

        self.log.record(
            LogEvent::new("report_generated")
                .with_command(period.command())
                .with_user(user_id),
        );

        Ok(GeneratedReport {
            file_name: report_file_name(&interval),
            content,
            rows: rows.len(),
        })
    }
}

/// `{from}-{to}.csv` in the date-time grammar, so the file can be sent back
/// for conversion
pub fn report_file_name(interval: &Interval) -> String {
    format!(
        "{}-{}.csv",
        format_bound(&interval.from()),
        format_bound(&interval.to())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::result::Error;
    use crate::domain::{CategoryMapping, CategoryTable, TransactionRecord};
    use crate::ports::MappingRepository;
    use crate::services::testing::{FakeBank, RecordingLog};
    use chrono::TimeZone;

    struct Fixture {
        service: TransactionService,
        bank: Arc<FakeBank>,
        store: Arc<MemoryStore>,
        log: Arc<RecordingLog>,
        user: Uuid,
    }

    fn fixture(transactions: Vec<TransactionRecord>) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let log = Arc::new(RecordingLog::default());
        let bank = Arc::new(FakeBank::with_transactions(transactions));
        let users = Arc::new(UserService::new(store.clone()));
        let mappings = Arc::new(MappingService::new(store.clone(), log.clone()));

        let user = Uuid::new_v4();
        users.set_token(user, "token").unwrap();
        users.set_account(user, "account").unwrap();

        let service = TransactionService::new(
            bank.clone(),
            users,
            mappings,
            ReportGenerator::default(),
            log.clone(),
        );

        Fixture {
            service,
            bank,
            store,
            log,
            user,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap()
    }

    fn tx(time: i64, mcc: i32) -> TransactionRecord {
        TransactionRecord {
            id: time.to_string(),
            time,
            description: "Purchase ABC".to_string(),
            mcc,
            amount: -95000,
            ..Default::default()
        }
    }

    #[test]
    fn test_month_report() {
        let f = fixture(vec![tx(1554466347, 7997), tx(1554466400, 5411)]);

        let report = f.service.report_at(f.user, &Period::Month, now()).unwrap();

        assert_eq!(report.file_name, "01.03.2024T00.00-31.03.2024T23.59.csv");
        assert_eq!(report.rows, 2);
        let text = String::from_utf8(report.content).unwrap();
        assert!(text.contains("05.04.2019 15:12:27,Purchase ABC,7997,7997,-950.00"));

        // Records outside the requested bounds are still included
        let calls = f.bank.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "token");
        assert_eq!(calls[0].1, "account");
        assert_eq!(
            f.log.names(),
            vec!["transactions_fetched", "report_generated"]
        );
    }

    #[test]
    fn test_today_bounds_sent_to_bank() {
        let f = fixture(vec![]);
        f.service.report_at(f.user, &Period::Today, now()).unwrap();

        let (_, _, from, to) = f.bank.calls()[0].clone();
        // Kyiv is UTC+2 in early March
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 3, 9, 22, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2024, 3, 10, 21, 59, 59).unwrap());
    }

    #[test]
    fn test_range_report_uses_mapping() {
        let f = fixture(vec![tx(1554466347, 7997)]);
        let table: CategoryTable = [CategoryMapping::new("7997", "", "Fun")].into_iter().collect();
        f.store
            .set_mapping(&format!("mapping_{}", f.user), &table)
            .unwrap();

        let report = f
            .service
            .report_at(f.user, &Period::Range("01.04.2019-10.04.2019".into()), now())
            .unwrap();

        assert_eq!(report.file_name, "01.04.2019T00.00-10.04.2019T23.59.csv");
        let text = String::from_utf8(report.content).unwrap();
        assert!(text.contains(",Fun,7997,"));
    }

    #[test]
    fn test_bad_range_never_reaches_bank() {
        let f = fixture(vec![]);
        let err = f
            .service
            .report_at(f.user, &Period::Range("yesterday".into()), now())
            .unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(f.bank.calls().is_empty());
    }

    #[test]
    fn test_missing_account_is_not_found() {
        let f = fixture(vec![]);
        let other = Uuid::new_v4();
        UserService::new(f.store.clone()).set_token(other, "t").unwrap();

        let err = f.service.report_at(other, &Period::Today, now()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bank_error_propagates() {
        let f = fixture(vec![]);
        f.bank.fail_with("rate limited");
        let err = f.service.report_at(f.user, &Period::Today, now()).unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }
}
