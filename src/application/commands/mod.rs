pub mod assignments;
pub mod broadcast;
pub mod issues;
pub mod pool;
pub mod prompts;
pub mod submissions;
