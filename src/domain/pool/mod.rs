pub mod entity;
pub mod health;
pub mod repository;
pub mod value_objects;

pub use entity::{AnonymousPoolPrompt, NewPoolPrompt};
pub use health::PoolHealth;
pub use repository::{PoolRepository, PoolUsage};
pub use value_objects::{PoolPromptId, PoolPromptStatus, WellnessTopic};
