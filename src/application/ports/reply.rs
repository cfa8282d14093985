// src/application/ports/reply.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// One-shot reply channel handed to us with the originating request.
#[async_trait]
pub trait DeferredReplier: Send + Sync {
    async fn reply(&self, response_url: &str, text: &str) -> ApplicationResult<()>;
}
