pub mod entity;
pub mod repository;
pub mod result;
pub mod value_objects;

pub use entity::{NewSubmission, Submission};
pub use repository::{ProcessedResultRepository, SubmissionRepository};
pub use result::{NewProcessedResult, ProcessedResult};
pub use value_objects::{
    ProcessedResultId, ProcessingStatus, SubmissionId, SubmissionText, TransformationProfile,
};
