use orgdeck_config::{AccessConfig, CorsConfig, ServerConfig};
use tracing::info;

use crate::store::{AccessDataset, RoleStore, StoreError};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: RoleStore,
    pub access_config: AccessConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        dataset: AccessDataset,
        access_config: AccessConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store: RoleStore::new(dataset),
            access_config,
            cors_config,
        }
    }
}

/// Loads the dataset named by `SEED_PATH`, or the built-in one.
pub fn init_app_state(server_config: &ServerConfig) -> Result<AppState, StoreError> {
    let dataset = match &server_config.seed_path {
        Some(path) => {
            info!(path = %path.display(), "Loading dataset");
            AccessDataset::load(path)?
        }
        None => {
            info!("SEED_PATH not set, using built-in dataset");
            AccessDataset::builtin()
        }
    };

    Ok(AppState::new(
        dataset,
        AccessConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
