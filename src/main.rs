//! Book Agora service entry point.
//!
//! Loads configuration, connects PostgreSQL, wires the adapters and
//! lifecycle scheduler, re-arms pending debate timers, and serves the
//! axum API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{middleware, Router};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use book_agora::adapters::ai::{OpenAiAnalysisProvider, OpenAiConfig};
use book_agora::adapters::auth::JwtIdentityVerifier;
use book_agora::adapters::catalog::{self, HttpBookCatalog};
use book_agora::adapters::events::InMemoryEventBus;
use book_agora::adapters::http::middleware::{auth_middleware, AuthState};
use book_agora::adapters::http::{
    comment_router, discussion_router, report_router, CommentAppState, DiscussionAppState,
    ReportAppState,
};
use book_agora::adapters::postgres::{
    PostgresCommentReader, PostgresCommentRepository, PostgresDiscussionReader,
    PostgresDiscussionRepository, PostgresParticipantRepository, PostgresReactionRepository,
    PostgresReportRepository, PostgresTargetDirectory,
};
use book_agora::adapters::scheduler::TokioTriggerScheduler;
use book_agora::application::handlers::discussion::{
    CloseDiscussionHandler, OpenDiscussionHandler,
};
use book_agora::application::LifecycleTriggerSink;
use book_agora::config::AppConfig;
use book_agora::domain::discussion::DiscussionStatus;
use book_agora::domain::foundation::ScrollQuery;
use book_agora::ports::{
    DiscussionFilter, DiscussionReader, DiscussionRepository, TimerKey, TriggerScheduler,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Persistence adapters
    let discussion_repository = Arc::new(PostgresDiscussionRepository::new(pool.clone()));
    let discussion_reader = Arc::new(PostgresDiscussionReader::new(pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pool.clone()));
    let comment_reader = Arc::new(PostgresCommentReader::new(pool.clone()));
    let participant_repository = Arc::new(PostgresParticipantRepository::new(pool.clone()));
    let reaction_repository = Arc::new(PostgresReactionRepository::new(pool.clone()));
    let report_repository = Arc::new(PostgresReportRepository::new(pool.clone()));
    let target_directory = Arc::new(PostgresTargetDirectory::new(pool.clone()));

    // Edge adapters
    let catalog = Arc::new(HttpBookCatalog::new(
        catalog::CatalogConfig::new(config.catalog.base_url.clone())
            .with_timeout(config.catalog.timeout()),
    )?);
    let analysis_api_key = config
        .analysis
        .api_key
        .as_ref()
        .ok_or("analysis API key is required")?;
    let analysis_provider = Arc::new(OpenAiAnalysisProvider::new(
        OpenAiConfig::new(analysis_api_key.expose_secret().clone())
            .with_model(config.analysis.model.clone())
            .with_base_url(config.analysis.base_url.clone())
            .with_timeout(config.analysis.timeout()),
    )?);
    let verifier: AuthState = Arc::new(JwtIdentityVerifier::new(config.auth.jwt_secret.clone()));
    let event_publisher = Arc::new(InMemoryEventBus::new());

    // Lifecycle trigger dispatch
    let open_handler = Arc::new(OpenDiscussionHandler::new(
        discussion_repository.clone() as Arc<dyn DiscussionRepository>,
        event_publisher.clone(),
    ));
    let close_handler = Arc::new(CloseDiscussionHandler::new(
        discussion_repository.clone(),
        comment_reader.clone(),
        analysis_provider,
        event_publisher.clone(),
        config.debate.max_analysis_attempts,
    ));
    let sink = Arc::new(LifecycleTriggerSink::new(open_handler, close_handler));
    let scheduler: Arc<dyn TriggerScheduler> = Arc::new(TokioTriggerScheduler::new(sink));

    restore_pending_timers(
        discussion_reader.clone(),
        discussion_repository.clone(),
        scheduler.clone(),
    )
    .await?;

    // HTTP surface
    let discussion_state = DiscussionAppState {
        discussion_repository: discussion_repository.clone(),
        discussion_reader: discussion_reader.clone(),
        participant_repository,
        catalog,
        scheduler,
        event_publisher: event_publisher.clone(),
        policy: config.debate.to_policy(),
    };
    let comment_state = CommentAppState {
        comment_repository,
        comment_reader,
        discussion_repository: discussion_repository.clone(),
        reaction_repository,
    };
    let report_state = ReportAppState {
        report_repository,
        target_directory,
        event_publisher,
    };

    let app = Router::new()
        .merge(discussion_router().with_state(discussion_state))
        .merge(comment_router().with_state(comment_state))
        .merge(report_router().with_state(report_state))
        .layer(middleware::from_fn_with_state(
            verifier.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "book-agora listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any))
}

/// Re-arms lifecycle timers after a restart.
///
/// Waiting debates get fresh open/close timers (persisted, so a later
/// edit can cancel them); Ongoing debates get a close timer only. Late
/// fire times fire immediately, and the handlers absorb duplicates.
async fn restore_pending_timers(
    reader: Arc<dyn DiscussionReader>,
    repository: Arc<dyn DiscussionRepository>,
    scheduler: Arc<dyn TriggerScheduler>,
) -> Result<(), Box<dyn std::error::Error>> {
    for status in [DiscussionStatus::Waiting, DiscussionStatus::Ongoing] {
        let filter = DiscussionFilter::default().with_status(status);
        let mut query = ScrollQuery::from_start(100);

        loop {
            let page = reader.scroll(&filter, query).await?;

            for summary in &page.items {
                let Some(mut discussion) = repository.find_by_id(summary.id).await? else {
                    continue;
                };
                let id = discussion.id();

                match status {
                    DiscussionStatus::Waiting => {
                        let open_timer = scheduler
                            .register_once(TimerKey::OpenDiscussion(id), discussion.start_date())
                            .await?;
                        let close_timer = scheduler
                            .register_once(TimerKey::CloseDiscussion(id), discussion.ends_at())
                            .await?;
                        discussion.set_timers(open_timer, close_timer);
                        repository.update(&discussion).await?;
                    }
                    _ => {
                        scheduler
                            .register_once(TimerKey::CloseDiscussion(id), discussion.ends_at())
                            .await?;
                    }
                }
                tracing::debug!(discussion_id = %id, status = %status, "re-armed lifecycle timers");
            }

            if !page.has_next {
                break;
            }
            query = ScrollQuery::new(page.last_id, 100);
        }
    }

    Ok(())
}
