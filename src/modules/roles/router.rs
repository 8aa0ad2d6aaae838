use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_permission_categories, get_permissions, get_role_by_id, get_roles};

pub fn init_permissions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_permissions))
        .route("/categories", get(get_permission_categories))
}

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roles))
        .route("/{id}", get(get_role_by_id))
}
