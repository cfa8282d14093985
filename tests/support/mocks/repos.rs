// tests/support/mocks/repos.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kawaraban_core::domain::{
    assignment::{
        Assignment, AssignmentId, AssignmentRepository, NewAssignment, PersonId,
        RotationHistoryEntry, RotationHistoryFilter, RotationHistoryRepository,
    },
    category::ContentCategory,
    errors::{DomainError, DomainResult},
    issue::{
        CycleKey, IssueId, IssueRepository, IssueStatus, IssueUpdate, IssueYear, NewIssue,
        PublicationIssue,
    },
    pool::{
        AnonymousPoolPrompt, NewPoolPrompt, PoolPromptId, PoolPromptStatus, PoolRepository,
        PoolUsage, WellnessTopic,
    },
    prompt::{NewPrompt, Prompt, PromptId, PromptRepository, PromptText},
    submission::{
        NewProcessedResult, NewSubmission, ProcessedResult, ProcessedResultId,
        ProcessedResultRepository, ProcessingStatus, Submission, SubmissionId,
        SubmissionRepository,
    },
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/* -------------------------------- Issues -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryIssueRepo {
    rows: Mutex<Vec<PublicationIssue>>,
    pub inserts: AtomicUsize,
}

impl InMemoryIssueRepo {
    pub fn all(&self) -> Vec<PublicationIssue> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepo {
    async fn find_or_insert(&self, issue: NewIssue) -> DomainResult<PublicationIssue> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter().find(|row| row.key == issue.key) {
            return Ok(existing.clone());
        }
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let created = PublicationIssue {
            id: IssueId(rows.len() as i64 + 1),
            key: issue.key,
            title: issue.title,
            body: String::new(),
            status: IssueStatus::Draft,
            publication_date: issue.publication_date,
            published_at: None,
            created_at: issue.created_at,
            updated_at: issue.created_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<PublicationIssue>> {
        Ok(self.rows.lock().unwrap().iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_key(&self, key: CycleKey) -> DomainResult<Option<PublicationIssue>> {
        Ok(self.rows.lock().unwrap().iter().find(|row| row.key == key).cloned())
    }

    async fn list(&self, year: Option<IssueYear>) -> DomainResult<Vec<PublicationIssue>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| year.is_none_or(|y| row.key.year == y))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.key.cmp(&a.key));
        Ok(rows)
    }

    async fn update(&self, update: IssueUpdate) -> DomainResult<PublicationIssue> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("issue {} not found", update.id)))?;
        if row.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict("issue update conflict, please retry".into()));
        }
        row.title = update.title;
        row.body = update.body;
        row.status = update.status;
        row.published_at = update.published_at;
        row.updated_at = update.updated_at;
        Ok(row.clone())
    }
}

/* -------------------------------- Prompts -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryPromptRepo {
    rows: Mutex<Vec<Prompt>>,
    claims_to_lose: AtomicUsize,
    lost: Mutex<Vec<PromptId>>,
}

impl InMemoryPromptRepo {
    /// 直接シードする (last_used_at を任意に指定可能)
    pub fn seed(
        &self,
        text: &str,
        category: ContentCategory,
        last_used_at: Option<DateTime<Utc>>,
    ) -> PromptId {
        let mut rows = self.rows.lock().unwrap();
        let id = PromptId(rows.len() as i64 + 1);
        rows.push(Prompt {
            id,
            text: PromptText::new(text).unwrap(),
            category,
            last_used_at,
            created_at: super::fixed_now(),
        });
        id
    }

    pub fn get(&self, id: PromptId) -> Option<Prompt> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    /// 次の n 回の mark_used_if を、別の呼び出しが先に使用済みにしたものとして失敗させる
    pub fn lose_next_claims(&self, n: usize) {
        self.claims_to_lose.store(n, Ordering::SeqCst);
    }

    /// 横取りされたプロンプトの ID (失敗した順)
    pub fn lost_claims(&self) -> Vec<PromptId> {
        self.lost.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptRepository for InMemoryPromptRepo {
    async fn insert(&self, prompt: NewPrompt) -> DomainResult<Prompt> {
        let mut rows = self.rows.lock().unwrap();
        let created = Prompt {
            id: PromptId(rows.len() as i64 + 1),
            text: prompt.text,
            category: prompt.category,
            last_used_at: None,
            created_at: prompt.created_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PromptId) -> DomainResult<Option<Prompt>> {
        Ok(self.get(id))
    }

    async fn list(&self, category: Option<ContentCategory>) -> DomainResult<Vec<Prompt>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.last_used_at, p.id.0));
        Ok(rows)
    }

    async fn mark_used_if(
        &self,
        id: PromptId,
        expected: Option<DateTime<Utc>>,
        used_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let lose = self
            .claims_to_lose
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if lose {
            if let Some(prompt) = rows.iter_mut().find(|p| p.id == id) {
                prompt.last_used_at = Some(used_at);
            }
            self.lost.lock().unwrap().push(id);
            return Ok(false);
        }
        match rows.iter_mut().find(|p| p.id == id) {
            Some(prompt) if prompt.last_used_at == expected => {
                prompt.last_used_at = Some(used_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_used(&self, id: PromptId, used_at: DateTime<Utc>) -> DomainResult<Prompt> {
        let mut rows = self.rows.lock().unwrap();
        let prompt = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("prompt {id} not found")))?;
        prompt.last_used_at = Some(used_at);
        Ok(prompt.clone())
    }
}

/* -------------------------------- Anonymous pool -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryPoolRepo {
    rows: Mutex<Vec<AnonymousPoolPrompt>>,
}

impl InMemoryPoolRepo {
    pub fn all(&self) -> Vec<AnonymousPoolPrompt> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoolRepository for InMemoryPoolRepo {
    async fn insert(&self, prompt: NewPoolPrompt) -> DomainResult<AnonymousPoolPrompt> {
        let mut rows = self.rows.lock().unwrap();
        let created = AnonymousPoolPrompt {
            id: PoolPromptId(rows.len() as i64 + 1),
            text: prompt.text,
            topic: prompt.topic,
            status: PoolPromptStatus::Active,
            created_at: prompt.created_at,
            used_at: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: PoolPromptId) -> DomainResult<Option<AnonymousPoolPrompt>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn take_oldest_active(
        &self,
        used_at: DateTime<Utc>,
    ) -> DomainResult<Option<AnonymousPoolPrompt>> {
        let mut rows = self.rows.lock().unwrap();
        let oldest = rows
            .iter_mut()
            .filter(|p| p.status == PoolPromptStatus::Active)
            .min_by_key(|p| (p.created_at, p.id.0));
        Ok(oldest.map(|prompt| {
            prompt.status = PoolPromptStatus::Used;
            prompt.used_at = Some(used_at);
            prompt.clone()
        }))
    }

    async fn set_status(
        &self,
        id: PoolPromptId,
        status: PoolPromptStatus,
    ) -> DomainResult<AnonymousPoolPrompt> {
        let mut rows = self.rows.lock().unwrap();
        let prompt = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("pool prompt {id} not found")))?;
        prompt.status = status;
        Ok(prompt.clone())
    }

    async fn count_active_by_topic(&self) -> DomainResult<Vec<(WellnessTopic, u64)>> {
        let mut counts: HashMap<WellnessTopic, u64> = HashMap::new();
        for prompt in self.rows.lock().unwrap().iter() {
            if prompt.status == PoolPromptStatus::Active {
                *counts.entry(prompt.topic).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn usage(&self, since: DateTime<Utc>) -> DomainResult<PoolUsage> {
        let rows = self.rows.lock().unwrap();
        let used: Vec<_> = rows
            .iter()
            .filter(|p| p.status == PoolPromptStatus::Used)
            .collect();
        Ok(PoolUsage {
            total_used: used.len() as u64,
            used_since: used
                .iter()
                .filter(|p| p.used_at.is_some_and(|at| at >= since))
                .count() as u64,
        })
    }
}

/* -------------------------------- Assignments -------------------------------- */

/// (issue, person) の一意制約をストレージ側で再現する
#[derive(Debug, Default)]
pub struct InMemoryAssignmentRepo {
    rows: Mutex<Vec<Assignment>>,
    next_id: AtomicUsize,
    /// true の間は事前チェックが既存行を見落とす (同時実行の競合を再現)
    pub blind_lookups: AtomicBool,
    /// true の間は一覧が古い状態を返す (一覧取得後に別の割り当てが入った状況)
    pub stale_listing: AtomicBool,
}

impl InMemoryAssignmentRepo {
    pub fn all(&self) -> Vec<Assignment> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepo {
    async fn insert(&self, assignment: NewAssignment) -> DomainResult<Assignment> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|a| a.issue_id == assignment.issue_id && a.person == assignment.person)
        {
            return Err(DomainError::Conflict(
                "person already has an assignment for this issue".into(),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let created = Assignment {
            id: AssignmentId(id),
            issue_id: assignment.issue_id,
            person: assignment.person,
            category: assignment.category,
            prompt_id: assignment.prompt_id,
            submission_id: None,
            created_at: assignment.created_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: AssignmentId) -> DomainResult<Option<Assignment>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_issue_and_person(
        &self,
        issue_id: IssueId,
        person: &PersonId,
    ) -> DomainResult<Option<Assignment>> {
        if self.blind_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.issue_id == issue_id && &a.person == person)
            .cloned())
    }

    async fn find_for(
        &self,
        issue_id: IssueId,
        person: &PersonId,
        category: ContentCategory,
    ) -> DomainResult<Option<Assignment>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.issue_id == issue_id && &a.person == person && a.category == category)
            .cloned())
    }

    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<Assignment>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.submission_id == Some(submission_id))
            .cloned())
    }

    async fn list_by_issue(&self, issue_id: IssueId) -> DomainResult<Vec<Assignment>> {
        if self.stale_listing.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.issue_id == issue_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| (a.created_at, a.id.0));
        Ok(rows)
    }

    async fn link_submission(
        &self,
        id: AssignmentId,
        submission_id: SubmissionId,
    ) -> DomainResult<Assignment> {
        let mut rows = self.rows.lock().unwrap();
        let assignment = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("assignment {id} not found")))?;
        assignment.submission_id = Some(submission_id);
        Ok(assignment.clone())
    }

    async fn delete(&self, id: AssignmentId) -> DomainResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn delete_unfulfilled_for_person(&self, person: &PersonId) -> DomainResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| !(&a.person == person && a.submission_id.is_none()));
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryRepo {
    rows: Mutex<Vec<RotationHistoryEntry>>,
}

impl InMemoryHistoryRepo {
    pub fn seed(&self, entry: RotationHistoryEntry) {
        self.rows.lock().unwrap().push(entry);
    }

    pub fn all(&self) -> Vec<RotationHistoryEntry> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RotationHistoryRepository for InMemoryHistoryRepo {
    async fn append(&self, entry: RotationHistoryEntry) -> DomainResult<()> {
        self.rows.lock().unwrap().push(entry);
        Ok(())
    }

    async fn list(&self, filter: RotationHistoryFilter) -> DomainResult<Vec<RotationHistoryEntry>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(rows)
    }
}

/* -------------------------------- Submissions -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemorySubmissionRepo {
    rows: Mutex<Vec<Submission>>,
}

impl InMemorySubmissionRepo {
    pub fn all(&self) -> Vec<Submission> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepo {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission> {
        let mut rows = self.rows.lock().unwrap();
        let created = Submission {
            id: SubmissionId(rows.len() as i64 + 1),
            author: submission.author,
            text: submission.text,
            prompt_id: submission.prompt_id,
            created_at: submission.created_at,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: SubmissionId) -> DomainResult<Option<Submission>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: SubmissionId) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        if rows.len() == before {
            return Err(DomainError::NotFound(format!("submission {id} not found")));
        }
        Ok(())
    }
}

/// 生成結果の保存先。FakeGenerator と ProcessedResultRepository で共有する
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    rows: Mutex<HashMap<i64, ProcessedResult>>,
}

impl InMemoryResultStore {
    /// Postgres 実装と同じく submission 単位で upsert し、再処理で retry_count を増やす
    pub fn upsert(&self, result: NewProcessedResult) -> ProcessedResult {
        let mut rows = self.rows.lock().unwrap();
        let key = result.submission_id.0;
        let next_id = rows.len() as i64 + 1;
        let status = result.status();
        let stored = match rows.get(&key) {
            Some(previous) => ProcessedResult {
                id: previous.id,
                submission_id: result.submission_id,
                issue_id: Some(result.issue_id),
                profile: result.profile,
                content: result.content,
                status,
                error: None,
                retry_count: previous.retry_count + 1,
                word_count: result.word_count,
                created_at: previous.created_at,
                updated_at: result.processed_at,
                processed_at: Some(result.processed_at),
            },
            None => ProcessedResult {
                id: ProcessedResultId(next_id),
                submission_id: result.submission_id,
                issue_id: Some(result.issue_id),
                profile: result.profile,
                content: result.content,
                status,
                error: None,
                retry_count: 0,
                word_count: result.word_count,
                created_at: result.processed_at,
                updated_at: result.processed_at,
                processed_at: Some(result.processed_at),
            },
        };
        rows.insert(key, stored.clone());
        stored
    }

    pub fn get(&self, submission_id: SubmissionId) -> Option<ProcessedResult> {
        self.rows.lock().unwrap().get(&submission_id.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_success(&self, submission_id: SubmissionId) -> bool {
        self.get(submission_id)
            .is_some_and(|r| r.status == ProcessingStatus::Success)
    }
}

#[async_trait]
impl ProcessedResultRepository for InMemoryResultStore {
    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<ProcessedResult>> {
        Ok(self.get(submission_id))
    }
}
