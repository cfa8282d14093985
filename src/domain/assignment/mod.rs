pub mod entity;
pub mod history;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Assignment, NewAssignment};
pub use history::{RotationHistoryEntry, RotationHistoryFilter};
pub use repository::{AssignmentRepository, RotationHistoryRepository};
pub use value_objects::{AssignmentId, PersonId};
