pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewPrompt, Prompt};
pub use repository::PromptRepository;
pub use services::PromptRotationSelector;
pub use value_objects::{PromptId, PromptText};
