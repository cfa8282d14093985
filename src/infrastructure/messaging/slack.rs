//! Slack Web API client backing [`MessagingGateway`].
//!
//! Only three methods are used: `chat.postMessage` for direct messages,
//! `users.info` for author enrichment and cursor-paginated `users.list`
//! for broadcasts. Slack reports most failures as HTTP 200 with
//! `"ok": false`, so every envelope is checked.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::messaging::{DirectoryMember, MessagingGateway, UserProfile},
};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";
const PAGE_LIMIT: &str = "200";

#[derive(Clone)]
pub struct SlackGateway {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl SlackGateway {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        timeout: Duration,
    ) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(format!("slack client: {err}")))?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.api_base)
    }

    async fn read_envelope<T: DeserializeOwned>(
        method: &str,
        response: reqwest::Response,
    ) -> ApplicationResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "slack {method} returned HTTP {status}"
            )));
        }

        let envelope: Envelope<T> = response.json().await.map_err(|err| {
            ApplicationError::infrastructure(format!("slack {method} response: {err}"))
        })?;

        match envelope {
            Envelope {
                ok: true,
                body: Some(body),
                ..
            } => Ok(body),
            Envelope { error, .. } => Err(ApplicationError::infrastructure(format!(
                "slack {method} failed: {}",
                error.unwrap_or_else(|| "unknown_error".to_string())
            ))),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> ApplicationResult<T> {
        let response = self
            .client
            .get(self.url(method))
            .bearer_auth(&self.bot_token)
            .query(query)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("slack {method}: {err}")))?;

        Self::read_envelope(method, response).await
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    body: Option<T>,
}

#[derive(Debug, Deserialize)]
struct PostMessageBody {}

#[derive(Debug, Deserialize)]
struct UserInfoBody {
    user: SlackUser,
}

#[derive(Debug, Deserialize)]
struct UsersListBody {
    #[serde(default)]
    members: Vec<SlackUser>,
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Debug, Default, Deserialize)]
struct SlackUser {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    real_name: Option<String>,
    #[serde(default)]
    is_bot: bool,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    is_restricted: bool,
    #[serde(default)]
    is_ultra_restricted: bool,
    #[serde(default)]
    profile: SlackProfile,
}

#[derive(Debug, Default, Deserialize)]
struct SlackProfile {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    real_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    email: String,
}

impl SlackUser {
    fn display_name(&self) -> String {
        [
            self.profile.display_name.as_str(),
            self.profile.real_name.as_str(),
            self.real_name.as_deref().unwrap_or_default(),
            self.name.as_str(),
        ]
        .into_iter()
        .find(|candidate| !candidate.trim().is_empty())
        .unwrap_or(self.id.as_str())
        .to_string()
    }
}

impl From<SlackUser> for DirectoryMember {
    fn from(user: SlackUser) -> Self {
        Self {
            display_name: user.display_name(),
            id: user.id,
            is_bot: user.is_bot,
            deleted: user.deleted,
            is_restricted: user.is_restricted,
            is_ultra_restricted: user.is_ultra_restricted,
        }
    }
}

#[async_trait]
impl MessagingGateway for SlackGateway {
    async fn send_direct(&self, recipient_id: &str, text: &str) -> ApplicationResult<()> {
        let method = "chat.postMessage";
        let response = self
            .client
            .post(self.url(method))
            .bearer_auth(&self.bot_token)
            .json(&serde_json::json!({ "channel": recipient_id, "text": text }))
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("slack {method}: {err}")))?;

        Self::read_envelope::<PostMessageBody>(method, response).await?;
        Ok(())
    }

    async fn resolve_user_profile(&self, recipient_id: &str) -> ApplicationResult<UserProfile> {
        let body: UserInfoBody = self.get("users.info", &[("user", recipient_id)]).await?;
        let display_name = body.user.display_name();
        let SlackProfile { title, email, .. } = body.user.profile;
        Ok(UserProfile {
            display_name,
            title,
            email,
        })
    }

    async fn list_directory_members(&self) -> ApplicationResult<Vec<DirectoryMember>> {
        let mut members = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut query = vec![("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                query.push(("cursor", cursor.as_str()));
            }
            let page: UsersListBody = self.get("users.list", &query).await?;
            members.extend(page.members.into_iter().map(DirectoryMember::from));

            match page.response_metadata {
                Some(meta) if !meta.next_cursor.is_empty() => cursor = meta.next_cursor,
                _ => break,
            }
        }

        tracing::debug!(count = members.len(), "slack directory listed");
        Ok(members)
    }
}
