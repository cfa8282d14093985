// tests/support/mocks/collaborators.rs
use super::repos::InMemoryResultStore;
use async_trait::async_trait;
use kawaraban_core::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{
        content::{ContentGenerator, GenerationRequest},
        messaging::{DirectoryMember, MessagingGateway, UserProfile},
        reply::DeferredReplier,
        time::Clock,
    },
};
use kawaraban_core::domain::submission::{NewProcessedResult, ProcessedResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Slack の代わり。送信ログを記録し、指定 ID への送信を失敗させられる
#[derive(Debug, Default)]
pub struct FakeMessaging {
    members: Mutex<Vec<DirectoryMember>>,
    failing_recipients: Mutex<HashSet<String>>,
    profiles: Mutex<HashMap<String, UserProfile>>,
    fail_listing: Mutex<bool>,
    fail_profiles: Mutex<bool>,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeMessaging {
    pub fn with_members(members: Vec<DirectoryMember>) -> Self {
        let messaging = Self::default();
        *messaging.members.lock().unwrap() = members;
        messaging
    }

    pub fn fail_sends_to(&self, recipient_id: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient_id.to_string());
    }

    pub fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }

    pub fn fail_profiles(&self) {
        *self.fail_profiles.lock().unwrap() = true;
    }

    pub fn set_profile(&self, id: &str, display_name: &str, title: &str) {
        self.profiles.lock().unwrap().insert(
            id.to_string(),
            UserProfile {
                display_name: display_name.to_string(),
                title: title.to_string(),
                email: format!("{id}@example.test"),
            },
        );
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

/// 一般ユーザーのディレクトリエントリ
pub fn member(id: &str) -> DirectoryMember {
    DirectoryMember {
        id: id.to_string(),
        display_name: format!("member {id}"),
        ..DirectoryMember::default()
    }
}

#[async_trait]
impl MessagingGateway for FakeMessaging {
    async fn send_direct(&self, recipient_id: &str, text: &str) -> ApplicationResult<()> {
        if self.failing_recipients.lock().unwrap().contains(recipient_id) {
            return Err(ApplicationError::infrastructure(format!(
                "channel_not_found for {recipient_id}"
            )));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn resolve_user_profile(&self, recipient_id: &str) -> ApplicationResult<UserProfile> {
        if *self.fail_profiles.lock().unwrap() {
            return Err(ApplicationError::infrastructure("users.info unavailable"));
        }
        self.profiles
            .lock()
            .unwrap()
            .get(recipient_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found(format!("user {recipient_id} not found")))
    }

    async fn list_directory_members(&self) -> ApplicationResult<Vec<DirectoryMember>> {
        if *self.fail_listing.lock().unwrap() {
            return Err(ApplicationError::infrastructure("users.list unavailable"));
        }
        Ok(self.members.lock().unwrap().clone())
    }
}

/// 生成サービスの代わり。結果は共有ストアに書き込む
pub struct FakeGenerator {
    store: Arc<InMemoryResultStore>,
    clock: Arc<dyn Clock>,
    failing: Mutex<bool>,
    panics_left: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn new(store: Arc<InMemoryResultStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            failing: Mutex::new(false),
            panics_left: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// 次の n 件の生成をパニックさせる
    pub fn panic_next(&self, n: usize) {
        self.panics_left.store(n, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate_and_persist(
        &self,
        request: GenerationRequest,
    ) -> ApplicationResult<ProcessedResult> {
        self.requests.lock().unwrap().push(request.clone());
        if self
            .panics_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            panic!("content generator crashed on submission {}", request.submission.id);
        }
        if *self.failing.lock().unwrap() {
            return Err(ApplicationError::infrastructure(
                "content generator returned 503",
            ));
        }
        let content = format!(
            "{} writes for {}: {}",
            request.author_name,
            request.author_department,
            request.submission.text.as_str()
        );
        let result = NewProcessedResult::success(
            request.submission.id,
            request.target_issue_id,
            request.profile,
            content,
            self.clock.now(),
        )?;
        Ok(self.store.upsert(result))
    }
}

/// 遅延返信の記録
#[derive(Debug, Default)]
pub struct RecordingReplier {
    replies: Mutex<Vec<(String, String)>>,
}

impl RecordingReplier {
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeferredReplier for RecordingReplier {
    async fn reply(&self, response_url: &str, text: &str) -> ApplicationResult<()> {
        self.replies
            .lock()
            .unwrap()
            .push((response_url.to_string(), text.to_string()));
        Ok(())
    }
}
