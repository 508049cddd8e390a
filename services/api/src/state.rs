use crate::config::{ApiConfig, BackendKind};
use crate::error::ApiError;
use crate::infra::memory::MemoryStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    store: MemoryStore,
    pub session_secret: String,
}

impl AppState {
    /// Construct the repository backend selected by configuration.
    /// Callers never learn which concrete backend is active; they only
    /// see the repository traits through the accessor methods.
    pub async fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let store = match config.backend {
            BackendKind::Memory => {
                MemoryStore::seeded(
                    &config.parent_emails,
                    &config.seed_password,
                    &config.baby_slug,
                    &config.baby_name,
                )
                .await?
            }
        };
        Ok(Self {
            store,
            session_secret: config.session_secret.clone(),
        })
    }

    pub fn auth_repo(&self) -> MemoryStore {
        self.store.clone()
    }

    pub fn baby_repo(&self) -> MemoryStore {
        self.store.clone()
    }

    pub fn event_type_repo(&self) -> MemoryStore {
        self.store.clone()
    }

    pub fn event_repo(&self) -> MemoryStore {
        self.store.clone()
    }
}
