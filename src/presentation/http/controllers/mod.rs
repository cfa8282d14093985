// src/presentation/http/controllers/mod.rs
pub mod assignments;
pub mod broadcast;
pub mod issues;
pub mod pool;
pub mod prompts;
pub mod slack;
pub mod submissions;
