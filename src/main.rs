//! Gravity Backend server entry point.
//!
//! Wires configuration, the PostgreSQL transcript store, the OpenAI client,
//! and the chat orchestrator into an Axum server.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gravity_backend::adapters::assistant::{OpenAiAssistantClient, OpenAiConfig};
use gravity_backend::adapters::http::chat::{chat_router, ChatAppState};
use gravity_backend::adapters::postgres::PostgresTranscriptStore;
use gravity_backend::application::handlers::chat::ChatOrchestrator;
use gravity_backend::config::{AppConfig, ServerConfig};
use gravity_backend::domain::chat::{compose_system_prompt, load_reference_document};
use gravity_backend::ports::TokioSleeper;

#[tokio::main]
async fn main() {
    // Configuration problems are reported on stderr; tracing is not up yet.
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {err}");
        process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(config).await {
        error!(error = %err, "Server failed");
        process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Connected to database");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
    }

    // validate() has already established the key is present.
    let api_key = config
        .assistant
        .api_key
        .as_ref()
        .map(|key| key.expose_secret().clone())
        .ok_or("assistant API key missing")?;

    let client = OpenAiAssistantClient::new(
        OpenAiConfig::new(api_key)
            .with_base_url(config.assistant.base_url.clone())
            .with_timeout(config.assistant.timeout()),
    );

    // The system prompt is assembled once at startup; a missing reference
    // document degrades to instructions-only with a logged warning.
    let reference = load_reference_document(config.assistant.reference_document_path.as_deref());
    let system_prompt = compose_system_prompt(&config.assistant.system_prompt, &reference);

    let orchestrator = ChatOrchestrator::new(
        config.assistant.clone(),
        system_prompt,
        Arc::new(client),
        Arc::new(PostgresTranscriptStore::new(pool)),
        Arc::new(TokioSleeper),
    );

    let app: Router = chat_router()
        .with_state(ChatAppState::new(Arc::new(orchestrator)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors(&config.server));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(port = config.server.port, "Server is running");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
