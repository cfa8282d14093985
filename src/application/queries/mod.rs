pub mod assignments;
pub mod issues;
pub mod pool;
pub mod prompts;
pub mod submissions;
