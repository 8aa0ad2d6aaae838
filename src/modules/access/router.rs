use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{get_role_access, update_category_access, update_role_access};

/// Mounted under `/api/roles`.
pub fn init_access_router() -> Router<AppState> {
    Router::new()
        .route("/{id}/access", get(get_role_access).put(update_role_access))
        .route("/{id}/access/{category}", put(update_category_access))
}
