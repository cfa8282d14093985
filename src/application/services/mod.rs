// src/application/services/mod.rs
use std::sync::Arc;

use chrono::{Duration, FixedOffset, Offset, Utc};

use crate::{
    application::{
        commands::{
            assignments::AssignmentCommandService, broadcast::BroadcastService,
            issues::IssueCommandService, pool::PoolCommandService, prompts::PromptCommandService,
            submissions::SubmissionCommandService,
        },
        pipeline::{PipelineQueue, ProfileResolverChain, SubmissionPipeline},
        ports::{
            content::ContentGenerator, messaging::MessagingGateway, reply::DeferredReplier,
            time::Clock,
        },
        queries::{
            assignments::AssignmentQueryService, issues::IssueQueryService, pool::PoolQueryService,
            prompts::PromptQueryService, submissions::SubmissionQueryService,
        },
    },
    domain::{
        assignment::{AssignmentRepository, RotationHistoryRepository},
        issue::{IssueRepository, PublicationCycleStore},
        pool::PoolRepository,
        prompt::{PromptRepository, PromptRotationSelector},
        submission::{ProcessedResultRepository, SubmissionRepository},
    },
};

/// Storage ports the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub issues: Arc<dyn IssueRepository>,
    pub prompts: Arc<dyn PromptRepository>,
    pub pool: Arc<dyn PoolRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub history: Arc<dyn RotationHistoryRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub results: Arc<dyn ProcessedResultRepository>,
}

/// External systems the core talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub messaging: Arc<dyn MessagingGateway>,
    pub generator: Arc<dyn ContentGenerator>,
    pub replier: Arc<dyn DeferredReplier>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub publication_offset: FixedOffset,
    pub rotation_lookback_weeks: u32,
    pub pipeline_workers: usize,
    pub pipeline_queue_capacity: usize,
    pub broadcast_concurrency: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            publication_offset: Utc.fix(),
            rotation_lookback_weeks: 8,
            pipeline_workers: 4,
            pipeline_queue_capacity: 64,
            broadcast_concurrency: 8,
        }
    }
}

pub struct ApplicationServices {
    pub issue_commands: Arc<IssueCommandService>,
    pub issue_queries: Arc<IssueQueryService>,
    pub assignment_commands: Arc<AssignmentCommandService>,
    pub assignment_queries: Arc<AssignmentQueryService>,
    pub prompt_commands: Arc<PromptCommandService>,
    pub prompt_queries: Arc<PromptQueryService>,
    pub pool_commands: Arc<PoolCommandService>,
    pub pool_queries: Arc<PoolQueryService>,
    pub submission_commands: Arc<SubmissionCommandService>,
    pub submission_queries: Arc<SubmissionQueryService>,
    pub broadcaster: Arc<BroadcastService>,
    pipeline_queue: Arc<PipelineQueue>,
}

impl ApplicationServices {
    /// Wire every service and start the pipeline workers. Must be called
    /// from within a Tokio runtime.
    pub fn new(repos: Repositories, collaborators: Collaborators, settings: ServiceSettings) -> Self {
        let Collaborators {
            messaging,
            generator,
            replier,
            clock,
        } = collaborators;

        let cycle_store = Arc::new(PublicationCycleStore::new(
            Arc::clone(&repos.issues),
            settings.publication_offset,
        ));
        let selector = Arc::new(PromptRotationSelector::new(Arc::clone(&repos.prompts)));

        let pipeline = Arc::new(SubmissionPipeline::new(
            Arc::clone(&repos.submissions),
            ProfileResolverChain::standard(Arc::clone(&repos.prompts), Arc::clone(&repos.assignments)),
            Arc::clone(&cycle_store),
            Arc::clone(&messaging),
            generator,
            replier,
            Arc::clone(&clock),
        ));
        let pipeline_queue = Arc::new(PipelineQueue::start(
            pipeline,
            settings.pipeline_workers,
            settings.pipeline_queue_capacity,
        ));

        let issue_commands = Arc::new(IssueCommandService::new(
            Arc::clone(&cycle_store),
            Arc::clone(&repos.issues),
            Arc::clone(&clock),
        ));
        let issue_queries = Arc::new(IssueQueryService::new(Arc::clone(&repos.issues)));

        let assignment_commands = Arc::new(AssignmentCommandService::new(
            Arc::clone(&repos.assignments),
            Arc::clone(&repos.history),
            Arc::clone(&repos.issues),
            Arc::clone(&selector),
            Arc::clone(&messaging),
            Arc::clone(&clock),
            Duration::try_weeks(i64::from(settings.rotation_lookback_weeks)).unwrap_or(Duration::MAX),
        ));
        let assignment_queries = Arc::new(AssignmentQueryService::new(
            Arc::clone(&repos.assignments),
            Arc::clone(&repos.history),
            Arc::clone(&cycle_store),
            Arc::clone(&clock),
        ));

        let prompt_commands = Arc::new(PromptCommandService::new(
            Arc::clone(&selector),
            Arc::clone(&repos.prompts),
            Arc::clone(&clock),
        ));
        let prompt_queries = Arc::new(PromptQueryService::new(Arc::clone(&repos.prompts)));

        let pool_commands = Arc::new(PoolCommandService::new(
            Arc::clone(&repos.pool),
            Arc::clone(&clock),
        ));
        let pool_queries = Arc::new(PoolQueryService::new(Arc::clone(&repos.pool), Arc::clone(&clock)));

        let submission_commands = Arc::new(SubmissionCommandService::new(
            Arc::clone(&repos.submissions),
            Arc::clone(&repos.assignments),
            Arc::clone(&cycle_store),
            Arc::clone(&pipeline_queue),
            Arc::clone(&clock),
        ));
        let submission_queries = Arc::new(SubmissionQueryService::new(Arc::clone(&repos.results)));

        let broadcaster = Arc::new(BroadcastService::new(
            messaging,
            settings.broadcast_concurrency,
        ));

        Self {
            issue_commands,
            issue_queries,
            assignment_commands,
            assignment_queries,
            prompt_commands,
            prompt_queries,
            pool_commands,
            pool_queries,
            submission_commands,
            submission_queries,
            broadcaster,
            pipeline_queue,
        }
    }

    /// Stop accepting submissions and let in-flight pipeline work finish.
    pub async fn shutdown(&self) {
        self.pipeline_queue.shutdown().await;
    }
}
