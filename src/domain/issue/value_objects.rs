use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueId(pub i64);

impl IssueId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("issue id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<IssueId> for i64 {
    fn from(value: IssueId) -> Self {
        value.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO week number, 1 through 53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekNumber(u32);

impl WeekNumber {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 53;

    pub fn new(value: i64) -> DomainResult<Self> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(DomainError::Validation(format!(
                "week: must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        // range checked above
        Ok(Self(u32::try_from(value).unwrap_or(Self::MIN)))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Publication year; the archive starts in 2020.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IssueYear(i32);

impl IssueYear {
    pub const FIRST: i32 = 2020;

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < i64::from(Self::FIRST) || value > i64::from(i32::MAX) {
            return Err(DomainError::Validation(format!(
                "year: must be {} or later, got {value}",
                Self::FIRST
            )));
        }
        Ok(Self(i32::try_from(value).unwrap_or(Self::FIRST)))
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Identity of a publication cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleKey {
    pub year: IssueYear,
    pub week: WeekNumber,
}

impl CycleKey {
    pub fn new(week: i64, year: i64) -> DomainResult<Self> {
        Ok(Self {
            week: WeekNumber::new(week)?,
            year: IssueYear::new(year)?,
        })
    }
}

impl fmt::Display for CycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} of {}", self.week.get(), self.year.get())
    }
}
