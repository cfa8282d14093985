// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of "now" for cycle resolution, prompt stamps and signature windows.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
