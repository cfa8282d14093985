// src/application/ports/mod.rs
//! Seams to the systems the core does not own.
pub mod content;
pub mod messaging;
pub mod reply;
pub mod time;
