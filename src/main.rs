//! Cloud Service Creator server binary.
//!
//! Loads configuration, wires storage and the text generator into the
//! application handlers, and serves the REST API.

use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cloud_service_creator::adapters::ai::{AnthropicConfig, AnthropicGenerator, MockTextGenerator};
use cloud_service_creator::adapters::http::{api_router, AppState};
use cloud_service_creator::adapters::storage::{
    FileBlobStore, FileRecordStore, InMemoryBlobStore, InMemoryRecordStore,
};
use cloud_service_creator::application::{
    AgentContext, ConversationEngine, GenerateCodeHandler, GetArtifactsHandler,
    LifecycleTestOrchestrator, ListServicesHandler, OrchestratorConfig,
};
use cloud_service_creator::config::{
    AiConfig, AiProvider, AppConfig, LogFormat, ServerConfig, StorageBackend,
};
use cloud_service_creator::domain::codegen::CodeBlockParser;
use cloud_service_creator::domain::foundation::OwnerId;
use cloud_service_creator::domain::questionnaire::QuestionCatalog;
use cloud_service_creator::ports::{
    ArtifactRepository, BlobStore, ConversationRepository, ServiceRepository, TestRunRepository,
    TextGenerator,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Cloud Service Creator starting"
    );

    let state = build_state(&config)?;
    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

struct Stores {
    conversations: Arc<dyn ConversationRepository>,
    services: Arc<dyn ServiceRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    runs: Arc<dyn TestRunRepository>,
    blobs: Arc<dyn BlobStore>,
}

fn build_stores(config: &AppConfig) -> Stores {
    match config.storage.backend {
        StorageBackend::Memory => {
            let records = InMemoryRecordStore::new();
            Stores {
                conversations: Arc::new(records.clone()),
                services: Arc::new(records.clone()),
                artifacts: Arc::new(records.clone()),
                runs: Arc::new(records),
                blobs: Arc::new(InMemoryBlobStore::new()),
            }
        }
        StorageBackend::File => {
            let dir = &config.storage.data_dir;
            tracing::info!(data_dir = %dir.display(), "Using file storage");
            let records = FileRecordStore::new(dir);
            Stores {
                conversations: Arc::new(records.clone()),
                services: Arc::new(records.clone()),
                artifacts: Arc::new(records.clone()),
                runs: Arc::new(records),
                blobs: Arc::new(FileBlobStore::new(dir)),
            }
        }
    }
}

fn build_generator(ai: &AiConfig) -> Result<Arc<dyn TextGenerator>, BoxError> {
    match ai.provider {
        AiProvider::Mock => {
            tracing::warn!("Using mock text generator");
            Ok(Arc::new(MockTextGenerator::new()))
        }
        AiProvider::Anthropic => {
            let key = ai.anthropic_api_key.clone().unwrap_or_default();
            let config = AnthropicConfig::new(key)
                .with_model(ai.model.clone())
                .with_base_url(ai.base_url.clone())
                .with_max_tokens(ai.max_tokens)
                .with_timeout(ai.timeout());
            Ok(Arc::new(AnthropicGenerator::new(config)?))
        }
    }
}

fn build_state(config: &AppConfig) -> Result<AppState, BoxError> {
    let stores = build_stores(config);
    let generator = build_generator(&config.ai)?;
    let owner = OwnerId::new(config.storage.owner.clone())?;

    let conversations = ConversationEngine::new(
        stores.conversations.clone(),
        QuestionCatalog::standard(),
    );
    let generate_code = GenerateCodeHandler::new(
        stores.conversations,
        stores.services.clone(),
        stores.artifacts.clone(),
        stores.blobs.clone(),
        generator,
        CodeBlockParser::default(),
        owner.clone(),
        config.ai.timeout(),
    );
    let get_artifacts = GetArtifactsHandler::new(
        stores.services.clone(),
        stores.artifacts.clone(),
        stores.blobs,
    );
    let list_services = ListServicesHandler::new(stores.services.clone(), owner.clone());
    let orchestrator = LifecycleTestOrchestrator::new(
        AgentContext {
            services: stores.services,
            artifacts: stores.artifacts,
            owner,
        },
        stores.runs,
        OrchestratorConfig {
            max_services: config.testing.max_services,
            agent_timeout: config.testing.agent_timeout(),
        },
    );

    Ok(AppState {
        conversations: Arc::new(conversations),
        generate_code: Arc::new(generate_code),
        get_artifacts: Arc::new(get_artifacts),
        list_services: Arc::new(list_services),
        orchestrator: Arc::new(orchestrator),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
