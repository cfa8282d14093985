// tests/support/mocks/mod.rs
//! テスト用モックの再エクスポート
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod collaborators;
pub mod repos;
pub mod time;

pub use collaborators::{FakeGenerator, FakeMessaging, RecordingReplier, member};
pub use repos::{
    InMemoryAssignmentRepo, InMemoryHistoryRepo, InMemoryIssueRepo, InMemoryPoolRepo,
    InMemoryPromptRepo, InMemoryResultStore, InMemorySubmissionRepo,
};
pub use time::{FixedClock, fixed_now};
