pub mod assignment;
pub mod category;
pub mod errors;
pub mod issue;
pub mod pool;
pub mod prompt;
pub mod submission;
