//! Application state wiring all services together.
//!
//! AppState holds the shared infrastructure plus one `ChatStateManager`
//! per authenticated user, created lazily on first request and dropped on
//! sign-out. Each manager sits behind a `tokio::sync::Mutex` so a user's
//! chat state is mutated by one request at a time.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use hearth_core::auth::AuthGate;
use hearth_core::chat::ChatStateManager;
use hearth_core::generate::ResponseGenerator;
use hearth_infra::config::{api_key_from_env, data_dir, load_global_config};
use hearth_infra::llm::OpenAiProvider;
use hearth_infra::sqlite::{DatabasePool, SqliteChatStore, SqliteIdentityProvider};
use hearth_types::config::GlobalConfig;
use hearth_types::error::ChatError;
use hearth_types::user::User;

/// The manager type pinned to the SQLite store.
pub type UserManager = ChatStateManager<SqliteChatStore>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<SqliteIdentityProvider>,
    pub responder: Arc<ResponseGenerator<OpenAiProvider>>,
    managers: Arc<DashMap<Uuid, Arc<Mutex<UserManager>>>>,
    pub db_pool: DatabasePool,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("hearth.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_global_config(&data_dir).await;

        let provider = match api_key_from_env() {
            Some(key) => {
                info!(model = %config.model, "model provider configured");
                Some(OpenAiProvider::new(key).map_err(|e| anyhow::anyhow!(e.to_string()))?)
            }
            None => {
                info!("no model API key set, running in offline mode with canned replies");
                None
            }
        };
        let responder = ResponseGenerator::new(provider, &config);

        Ok(Self {
            identity: Arc::new(SqliteIdentityProvider::new(db_pool.clone())),
            responder: Arc::new(responder),
            managers: Arc::new(DashMap::new()),
            db_pool,
            config,
            data_dir,
        })
    }

    /// Fetch or create the chat state manager for `user`.
    ///
    /// A new manager is hydrated from the store before being published; on
    /// a racing first request the loser's copy is discarded.
    pub async fn manager_for(&self, user: &User) -> Result<Arc<Mutex<UserManager>>, ChatError> {
        if let Some(existing) = self.managers.get(&user.id) {
            return Ok(existing.clone());
        }

        let gate = AuthGate::new();
        gate.set_signed_in(user.clone());
        let mut manager = ChatStateManager::new(SqliteChatStore::new(self.db_pool.clone()), gate);
        manager.load_all().await?;

        debug!(user_id = %user.id, "created chat state manager");
        let entry = self
            .managers
            .entry(user.id)
            .or_insert_with(|| Arc::new(Mutex::new(manager)));
        Ok(entry.clone())
    }

    /// Drop the manager for `user_id`, if any. Called on sign-out.
    pub async fn drop_manager(&self, user_id: &Uuid) {
        if let Some((_, manager)) = self.managers.remove(user_id) {
            let mut manager = manager.lock().await;
            manager.gate().set_signed_out();
            manager.clear();
            debug!(%user_id, "dropped chat state manager");
        }
    }
}
