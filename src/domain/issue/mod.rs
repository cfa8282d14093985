pub mod calendar;
pub mod entity;
pub mod repository;
pub mod services;
pub mod status;
pub mod value_objects;

pub use calendar::{current_cycle, publication_date};
pub use entity::{IssueUpdate, NewIssue, PublicationIssue};
pub use repository::IssueRepository;
pub use services::PublicationCycleStore;
pub use status::IssueStatus;
pub use value_objects::{CycleKey, IssueId, IssueYear, WeekNumber};
