use std::time::Duration;

use async_trait::async_trait;

use crate::application::{ApplicationResult, error::ApplicationError, ports::reply::DeferredReplier};

/// Posts an ephemeral follow-up to the one-shot URL a slash command hands us.
#[derive(Clone)]
pub struct ResponseUrlReplier {
    client: reqwest::Client,
}

impl ResponseUrlReplier {
    pub fn new(timeout: Duration) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(format!("reply client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DeferredReplier for ResponseUrlReplier {
    async fn reply(&self, response_url: &str, text: &str) -> ApplicationResult<()> {
        let response = self
            .client
            .post(response_url)
            .json(&serde_json::json!({
                "response_type": "ephemeral",
                "replace_original": false,
                "text": text,
            }))
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("deferred reply: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "deferred reply returned HTTP {status}"
            )));
        }
        Ok(())
    }
}
