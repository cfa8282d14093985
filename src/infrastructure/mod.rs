pub mod content;
pub mod database;
pub mod messaging;
pub mod repositories;
pub mod security;
pub mod time;
