pub mod assignments;
pub mod broadcast;
pub mod issues;
pub mod pool;
pub mod prompts;
pub mod submissions;

pub use assignments::{AssignmentDto, RotationHistoryDto};
pub use broadcast::BroadcastReport;
pub use issues::IssueDto;
pub use pool::{BulkAddRejection, BulkAddReport, PoolPromptDto, PoolStatusDto};
pub use prompts::PromptDto;
pub use submissions::{ProcessedResultDto, SubmissionReceipt};

/// Human-readable one-line description of an operation's outcome, suitable
/// for relaying verbatim to the person who triggered it.
pub trait Summary {
    fn summary(&self) -> String;
}

impl<T: Summary> Summary for Vec<T> {
    fn summary(&self) -> String {
        match self.len() {
            0 => "No records found.".to_string(),
            1 => "1 record.".to_string(),
            n => format!("{n} records."),
        }
    }
}
