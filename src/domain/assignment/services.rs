use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;

use crate::domain::assignment::history::RotationHistoryEntry;
use crate::domain::assignment::value_objects::PersonId;

/// Choose the candidate who has waited longest since their last assignment
/// in `history`. Candidates absent from the history come first; ties are
/// broken at random.
pub fn pick_least_recent_assignee(
    candidates: &[PersonId],
    history: &[RotationHistoryEntry],
) -> Option<PersonId> {
    let mut last_assigned: HashMap<&PersonId, DateTime<Utc>> = HashMap::new();
    for entry in history {
        last_assigned
            .entry(&entry.person)
            .and_modify(|at| *at = (*at).max(entry.recorded_at))
            .or_insert(entry.recorded_at);
    }

    let oldest = candidates
        .iter()
        .map(|person| last_assigned.get(person).copied())
        .min()?;

    let tier: Vec<&PersonId> = candidates
        .iter()
        .filter(|person| last_assigned.get(person).copied() == oldest)
        .collect();
    tier.choose(&mut rand::rng()).map(|person| (*person).clone())
}
