//! Background processing of accepted submissions.
//!
//! A submission is stored synchronously, then a [`PipelineJob`] is handed to
//! the bounded [`PipelineQueue`]. Workers enrich the author, pick a
//! transformation profile, resolve the current issue and hand everything to
//! the content generator in a single call. The outcome is reported on the
//! job's deferred reply URL when one was supplied. Nothing is retried
//! automatically; reprocessing is an explicit admin action.
pub mod enrich;
pub mod profile;
pub mod queue;
pub mod runner;

pub use profile::{ProfileResolver, ProfileResolverChain};
pub use queue::PipelineQueue;
pub use runner::SubmissionPipeline;

use crate::domain::submission::SubmissionId;

#[derive(Debug, Clone)]
pub struct PipelineJob {
    pub submission_id: SubmissionId,
    pub response_url: Option<String>,
}
