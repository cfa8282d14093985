use crate::application::error::ApplicationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Summary;

/// Per-broadcast delivery tally. `total_users` counts recipients left after
/// filtering out bots, deleted and restricted accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BroadcastReport {
    pub total_users: usize,
    pub successful_sends: usize,
    pub failed_sends: usize,
    pub errors: Vec<String>,
}

impl BroadcastReport {
    pub fn aggregate_error(&self) -> Option<ApplicationError> {
        if self.failed_sends == 0 {
            return None;
        }
        Some(ApplicationError::partial_failure(format!(
            "broadcast failed for {} of {} recipients",
            self.failed_sends, self.total_users
        )))
    }
}

impl Summary for BroadcastReport {
    fn summary(&self) -> String {
        format!(
            "Broadcast delivered to {} of {} recipients ({} failed).",
            self.successful_sends, self.total_users, self.failed_sends
        )
    }
}
