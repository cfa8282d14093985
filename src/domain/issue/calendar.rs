//! Publication calendar arithmetic.
//!
//! Issues go out on the Thursday of their ISO week at 09:30 in the
//! newsroom's reference offset.
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::value_objects::CycleKey;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

pub const PUBLICATION_HOUR: u32 = 9;
pub const PUBLICATION_MINUTE: u32 = 30;
const THURSDAY_FROM_MONDAY: i64 = 3;

/// Monday of the given ISO week. January 4 always falls in ISO week 1.
pub fn week_monday(key: CycleKey) -> DomainResult<NaiveDate> {
    let anchor = NaiveDate::from_ymd_opt(key.year.get(), 1, 4)
        .ok_or_else(|| DomainError::Validation(format!("year: {} out of range", key.year.get())))?;
    let first_monday =
        anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
    Ok(first_monday + Duration::weeks(i64::from(key.week.get()) - 1))
}

pub fn publication_date(key: CycleKey, offset: FixedOffset) -> DomainResult<DateTime<Utc>> {
    let thursday = week_monday(key)? + Duration::days(THURSDAY_FROM_MONDAY);
    let time = NaiveTime::from_hms_opt(PUBLICATION_HOUR, PUBLICATION_MINUTE, 0)
        .ok_or_else(|| DomainError::Validation("invalid publication time".into()))?;
    offset
        .from_local_datetime(&thursday.and_time(time))
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| DomainError::Validation(format!("{key} has no publication time")))
}

/// Cycle containing `now` as seen from the reference offset.
pub fn current_cycle(now: DateTime<Utc>, offset: FixedOffset) -> DomainResult<CycleKey> {
    let iso = now.with_timezone(&offset).iso_week();
    CycleKey::new(i64::from(iso.week()), i64::from(iso.year()))
}
