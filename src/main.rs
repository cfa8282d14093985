use kawaraban_core::application::{
    ports::time::Clock,
    services::{ApplicationServices, Collaborators, Repositories, ServiceSettings},
};
use kawaraban_core::config::AppConfig;
use kawaraban_core::infrastructure::{
    content::HttpContentGenerator,
    database,
    messaging::{ResponseUrlReplier, SlackGateway},
    repositories::{
        PostgresAssignmentRepository, PostgresIssueRepository, PostgresPoolRepository,
        PostgresProcessedResultRepository, PostgresPromptRepository,
        PostgresRotationHistoryRepository, PostgresSubmissionRepository,
    },
    security::SlackSignatureVerifier,
    time::SystemClock,
};
use kawaraban_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(10);
const BROADCAST_CONCURRENCY: usize = 8;

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let repos = Repositories {
        issues: Arc::new(PostgresIssueRepository::new(pool.clone())),
        prompts: Arc::new(PostgresPromptRepository::new(pool.clone())),
        pool: Arc::new(PostgresPoolRepository::new(pool.clone())),
        assignments: Arc::new(PostgresAssignmentRepository::new(pool.clone())),
        history: Arc::new(PostgresRotationHistoryRepository::new(pool.clone())),
        submissions: Arc::new(PostgresSubmissionRepository::new(pool.clone())),
        results: Arc::new(PostgresProcessedResultRepository::new(pool.clone())),
    };

    let collaborators = Collaborators {
        messaging: Arc::new(SlackGateway::new(
            config.slack_api_base(),
            config.slack_bot_token(),
            OUTBOUND_TIMEOUT,
        )?),
        generator: Arc::new(HttpContentGenerator::new(
            config.content_generator_url(),
            config.content_generator_timeout(),
            pool.clone(),
            Arc::clone(&clock),
        )?),
        replier: Arc::new(ResponseUrlReplier::new(OUTBOUND_TIMEOUT)?),
        clock: Arc::clone(&clock),
    };

    let settings = ServiceSettings {
        publication_offset: config.publication_offset(),
        rotation_lookback_weeks: config.rotation_lookback_weeks(),
        pipeline_workers: config.pipeline_workers(),
        pipeline_queue_capacity: config.pipeline_queue_capacity(),
        broadcast_concurrency: BROADCAST_CONCURRENCY,
    };

    let services = Arc::new(ApplicationServices::new(repos, collaborators, settings));

    let state = HttpState {
        services: Arc::clone(&services),
        operator_token: Arc::from(config.operator_api_token()),
        slack_verifier: Arc::new(SlackSignatureVerifier::new(config.slack_signing_secret())?),
        clock,
    };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("draining submission pipeline");
    services.shutdown().await;
    pool.close().await;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
