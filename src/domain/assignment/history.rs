use crate::domain::assignment::value_objects::PersonId;
use crate::domain::category::ContentCategory;
use crate::domain::issue::CycleKey;
use chrono::{DateTime, Utc};

/// Append-only record of who was assigned what, and when.
#[derive(Debug, Clone)]
pub struct RotationHistoryEntry {
    pub person: PersonId,
    pub category: ContentCategory,
    pub cycle: CycleKey,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RotationHistoryFilter {
    pub person: Option<PersonId>,
    pub category: Option<ContentCategory>,
    pub since: Option<DateTime<Utc>>,
}

impl RotationHistoryFilter {
    pub fn matches(&self, entry: &RotationHistoryEntry) -> bool {
        self.person.as_ref().is_none_or(|p| *p == entry.person)
            && self.category.is_none_or(|c| c == entry.category)
            && self.since.is_none_or(|since| entry.recorded_at >= since)
    }
}
