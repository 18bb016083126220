//! TemporalGate - Month-based mutation policy for financial records
//!
//! A record may be created, updated or deleted only while its reference month
//! is the current month or a later one. "Current" is read from a [`Clock`] on
//! every evaluation, so a long-running process never gates against a stale month.

use crate::core::AppError;
use crate::repositories::RecordStore;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
    static ref DAY_FIRST_DATE: Regex = Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap();
    static ref YEAR_MONTH: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}$").unwrap();
}

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferenceMonth(NaiveDate);

impl ReferenceMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Parses a client supplied month. The day component, when present, is
    /// validated and then discarded.
    pub fn parse(raw: &str) -> Result<Self, TemporalError> {
        let raw = raw.trim();
        let unparseable = || TemporalError::Unparseable(raw.to_string());

        let date = if ISO_DATE.is_match(raw) {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| unparseable())?
        } else if DAY_FIRST_DATE.is_match(raw) {
            NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|_| unparseable())?
        } else if YEAR_MONTH.is_match(raw) {
            NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
                .map_err(|_| unparseable())?
        } else {
            DateTime::parse_from_rfc3339(raw)
                .map_err(|_| unparseable())?
                .date_naive()
        };

        Ok(Self::from_date(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TemporalError {
    #[error(
        "reference_month '{0}' is not a valid date (accepted: YYYY-MM-DD, DD/MM/YYYY, YYYY-MM or an RFC 3339 timestamp)"
    )]
    Unparseable(String),

    #[error("month {requested} is before the current month {current}")]
    PastCreation {
        requested: ReferenceMonth,
        current: ReferenceMonth,
    },

    #[error("record belongs to month {record}, before the current month {current}")]
    PastMutation {
        record: ReferenceMonth,
        current: ReferenceMonth,
    },
}

/// Source of "today".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the server's local time zone, so the month turns over at
/// local midnight. Run the process with `TZ` set to move that boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a given day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Only strictly past months are blocked; there is no upper bound.
pub fn permits(current: ReferenceMonth, record: ReferenceMonth) -> bool {
    record >= current
}

#[derive(Clone)]
pub struct TemporalGate {
    clock: Arc<dyn Clock>,
}

impl TemporalGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn current_month(&self) -> ReferenceMonth {
        ReferenceMonth::from_date(self.clock.today())
    }

    /// Validates the month proposed for a new record (or the new month of a
    /// record being moved) and returns it parsed.
    #[instrument(skip(self))]
    pub fn check_creation(&self, proposed: &str) -> Result<ReferenceMonth, TemporalError> {
        let requested = ReferenceMonth::parse(proposed)?;
        let current = self.current_month();
        if !permits(current, requested) {
            warn!("Rejected creation for past month {}", requested);
            return Err(TemporalError::PastCreation { requested, current });
        }
        Ok(requested)
    }

    /// Decision for a record whose month is already known.
    pub fn check_record_month(&self, record: ReferenceMonth) -> Result<(), TemporalError> {
        let current = self.current_month();
        if !permits(current, record) {
            warn!("Rejected mutation of record from past month {}", record);
            return Err(TemporalError::PastMutation { record, current });
        }
        Ok(())
    }

    /// Looks up the persisted month of a record and applies the mutation check.
    ///
    /// A record that cannot be found does not block: the caller's existence
    /// check reports it as not found.
    #[instrument(skip(self, store))]
    pub async fn check_mutation<R, C, U>(
        &self,
        store: &dyn RecordStore<R, C, U>,
        account_id: i32,
        record_id: i32,
    ) -> Result<(), AppError> {
        match store.reference_month(account_id, record_id).await? {
            Some(date) => {
                self.check_record_month(ReferenceMonth::from_date(date))?;
                Ok(())
            }
            None => {
                debug!("Record {} not found, temporal check skipped", record_id);
                Ok(())
            }
        }
    }
}
