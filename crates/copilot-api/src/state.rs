//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. Core services are generic over the storage and memory
//! ports; AppState pins them to the infra implementations.

use std::path::Path;
use std::sync::Arc;

use copilot_core::memory::categories::MemoryCategories;
use copilot_core::memory::service::ChatMemoryService;
use copilot_core::storage::repository::{ChatParticipantRepository, ChatSessionRepository, Repository};
use copilot_infra::config::resolve_database_url;
use copilot_infra::memory::http_client::HttpMemoryClient;
use copilot_infra::sqlite::context::SqliteStorageContext;
use copilot_infra::sqlite::pool::DatabasePool;
use copilot_types::chat::{ChatParticipant, ChatSession};
use copilot_types::config::{AuthConfig, ServiceConfig};

/// Concrete type aliases for the generic repositories and services.
pub type ConcreteSessionRepository = ChatSessionRepository<SqliteStorageContext<ChatSession>>;

pub type ConcreteParticipantRepository =
    ChatParticipantRepository<SqliteStorageContext<ChatParticipant>>;

pub type ConcreteMemoryService =
    ChatMemoryService<Arc<ConcreteSessionRepository>, HttpMemoryClient>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub memory_service: Arc<ConcreteMemoryService>,
    pub sessions: Arc<ConcreteSessionRepository>,
    pub participants: Arc<ConcreteParticipantRepository>,
    pub auth: AuthConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Connect to the database and the memory service, then wire services.
    pub async fn init(config: &ServiceConfig, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = resolve_database_url(config, data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let sessions: Arc<ConcreteSessionRepository> = Arc::new(Repository::new(
            SqliteStorageContext::new(db_pool.clone(), &config.database.chat_session_table)
                .await?,
        ));
        let participants: Arc<ConcreteParticipantRepository> = Arc::new(Repository::new(
            SqliteStorageContext::new(db_pool.clone(), &config.database.chat_participant_table)
                .await?,
        ));

        let memory_client = HttpMemoryClient::new(&config.memory)?;
        let categories = MemoryCategories::new(config.prompts.memory_map.clone());

        tracing::info!(
            memory_endpoint = %memory_client.endpoint(),
            index = %config.memory.index_name,
            categories = ?categories.names().collect::<Vec<_>>(),
            "application state initialized"
        );

        let memory_service = ChatMemoryService::new(
            Arc::clone(&sessions),
            memory_client,
            categories,
            config.memory.index_name.clone(),
        );

        Ok(Self {
            memory_service: Arc::new(memory_service),
            sessions,
            participants,
            auth: config.auth.clone(),
            db_pool,
        })
    }
}
