// tests/support/helpers.rs
use super::mocks::{
    FakeGenerator, FakeMessaging, FixedClock, InMemoryAssignmentRepo, InMemoryHistoryRepo,
    InMemoryIssueRepo, InMemoryPoolRepo, InMemoryPromptRepo, InMemoryResultStore,
    InMemorySubmissionRepo, RecordingReplier,
};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use kawaraban_core::application::services::{
    ApplicationServices, Collaborators, Repositories, ServiceSettings,
};
use kawaraban_core::infrastructure::security::SlackSignatureVerifier;
use kawaraban_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

pub const OPERATOR_TOKEN: &str = "test-operator-token";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// モック一式と、それらを配線したサービス
pub struct Harness {
    pub issues: Arc<InMemoryIssueRepo>,
    pub prompts: Arc<InMemoryPromptRepo>,
    pub pool: Arc<InMemoryPoolRepo>,
    pub assignments: Arc<InMemoryAssignmentRepo>,
    pub history: Arc<InMemoryHistoryRepo>,
    pub submissions: Arc<InMemorySubmissionRepo>,
    pub results: Arc<InMemoryResultStore>,
    pub messaging: Arc<FakeMessaging>,
    pub generator: Arc<FakeGenerator>,
    pub replier: Arc<RecordingReplier>,
    pub clock: Arc<FixedClock>,
    pub services: Arc<ApplicationServices>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_messaging(FakeMessaging::default())
    }

    pub fn with_messaging(messaging: FakeMessaging) -> Self {
        Self::with_parts(messaging, test_settings())
    }

    pub fn with_settings(settings: ServiceSettings) -> Self {
        Self::with_parts(FakeMessaging::default(), settings)
    }

    fn with_parts(messaging: FakeMessaging, settings: ServiceSettings) -> Self {
        let clock = Arc::new(FixedClock::default());
        let results = Arc::new(InMemoryResultStore::default());
        let generator = Arc::new(FakeGenerator::new(Arc::clone(&results), clock.clone()));

        let issues = Arc::new(InMemoryIssueRepo::default());
        let prompts = Arc::new(InMemoryPromptRepo::default());
        let pool = Arc::new(InMemoryPoolRepo::default());
        let assignments = Arc::new(InMemoryAssignmentRepo::default());
        let history = Arc::new(InMemoryHistoryRepo::default());
        let submissions = Arc::new(InMemorySubmissionRepo::default());
        let messaging = Arc::new(messaging);
        let replier = Arc::new(RecordingReplier::default());

        let repos = Repositories {
            issues: issues.clone(),
            prompts: prompts.clone(),
            pool: pool.clone(),
            assignments: assignments.clone(),
            history: history.clone(),
            submissions: submissions.clone(),
            results: results.clone(),
        };
        let collaborators = Collaborators {
            messaging: messaging.clone(),
            generator: generator.clone(),
            replier: replier.clone(),
            clock: clock.clone(),
        };
        Self {
            issues,
            prompts,
            pool,
            assignments,
            history,
            submissions,
            results,
            messaging,
            generator,
            replier,
            clock,
            services: Arc::new(ApplicationServices::new(repos, collaborators, settings)),
        }
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
            operator_token: Arc::from(OPERATOR_TOKEN),
            slack_verifier: Arc::new(
                SlackSignatureVerifier::new(SIGNING_SECRET).expect("signing secret"),
            ),
            clock: self.clock.clone(),
        };
        build_router(state, &["http://localhost:3000".to_string()])
    }
}

/// ワーカー数などを小さくしたテスト用設定
pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        pipeline_workers: 2,
        pipeline_queue_capacity: 8,
        broadcast_concurrency: 4,
        ..ServiceSettings::default()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn make_test_router() -> axum::Router {
    Harness::new().router()
}

pub fn operator_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {OPERATOR_TOKEN}"));
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> String {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
    msg_field.to_string()
}

/// 条件が満たされるまで短い間隔で待つ (バックグラウンドワーカー用)
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..300 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("condition not met within 3s");
}
