use axum::{
    Json,
    extract::{Path, Query, State},
};
use orgdeck_core::AppError;
use orgdeck_models::{Permission, PermissionCategory, Role, RoleId};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::state::AppState;

use super::service;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PermissionFilterParams {
    /// Filter by resolved category
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoleFilterParams {
    /// `true` for custom roles only, `false` for built-in roles only
    pub is_custom: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/permissions",
    params(PermissionFilterParams),
    responses(
        (status = 200, description = "Permission catalog", body = Vec<Permission>)
    ),
    tag = "Permissions"
)]
pub async fn get_permissions(
    State(state): State<AppState>,
    Query(params): Query<PermissionFilterParams>,
) -> Json<Vec<Permission>> {
    Json(service::get_all_permissions(
        &state.store,
        params.category.as_deref(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/permissions/categories",
    responses(
        (status = 200, description = "Catalog grouped by category", body = Vec<PermissionCategory>)
    ),
    tag = "Permissions"
)]
pub async fn get_permission_categories(
    State(state): State<AppState>,
) -> Json<Vec<PermissionCategory>> {
    Json(service::get_permission_categories(&state.store))
}

#[utoipa::path(
    get,
    path = "/api/roles",
    params(RoleFilterParams),
    responses(
        (status = 200, description = "List of roles", body = Vec<Role>)
    ),
    tag = "Roles"
)]
pub async fn get_roles(
    State(state): State<AppState>,
    Query(params): Query<RoleFilterParams>,
) -> Json<Vec<Role>> {
    Json(service::get_roles(&state.store, params.is_custom).await)
}

#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role details", body = Role),
        (status = 404, description = "Role not found")
    ),
    tag = "Roles"
)]
pub async fn get_role_by_id(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<Role>, AppError> {
    let role = service::get_role_by_id(&state.store, id).await?;
    Ok(Json(role))
}
