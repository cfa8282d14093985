// src/application/ports/messaging.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub title: String,
    pub email: String,
}

/// Directory entry together with the account flags used to decide whether
/// the member should receive broadcasts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryMember {
    pub id: String,
    pub display_name: String,
    pub is_bot: bool,
    pub deleted: bool,
    pub is_restricted: bool,
    pub is_ultra_restricted: bool,
}

impl DirectoryMember {
    /// Workspace-provided system user that is not flagged as a bot.
    pub const SYSTEM_USER_ID: &'static str = "USLACKBOT";

    pub fn is_eligible_recipient(&self) -> bool {
        !(self.is_bot
            || self.deleted
            || self.is_restricted
            || self.is_ultra_restricted
            || self.id == Self::SYSTEM_USER_ID)
    }
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_direct(&self, recipient_id: &str, text: &str) -> ApplicationResult<()>;
    async fn resolve_user_profile(&self, recipient_id: &str) -> ApplicationResult<UserProfile>;
    async fn list_directory_members(&self) -> ApplicationResult<Vec<DirectoryMember>>;
}
