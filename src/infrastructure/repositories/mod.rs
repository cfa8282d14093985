// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_assignment;
mod postgres_issue;
mod postgres_pool;
mod postgres_prompt;
mod postgres_submission;

pub use error::map_sqlx;
pub use postgres_assignment::{PostgresAssignmentRepository, PostgresRotationHistoryRepository};
pub use postgres_issue::PostgresIssueRepository;
pub use postgres_pool::PostgresPoolRepository;
pub use postgres_prompt::PostgresPromptRepository;
pub use postgres_submission::{PostgresProcessedResultRepository, PostgresSubmissionRepository};

pub(crate) use error::count;
pub(crate) use postgres_submission::{PROCESSED_RESULT_COLUMNS, ProcessedResultRow};
