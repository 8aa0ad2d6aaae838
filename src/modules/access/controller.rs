use axum::{
    Json,
    extract::{Path, State},
};
use orgdeck_core::AppError;
use orgdeck_models::{
    AccessGroup, BulkUpdateAccessDto, RoleAccessMatrix, RoleAccessUpdateResponse, RoleId,
    UpdateAccessGroupDto,
};
use tracing::info;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service;

#[utoipa::path(
    get,
    path = "/api/roles/{id}/access",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Access group per category", body = RoleAccessMatrix),
        (status = 404, description = "Role not found")
    ),
    tag = "Access"
)]
pub async fn get_role_access(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Json<RoleAccessMatrix>, AppError> {
    let role = state.store.role(id).await.map_err(|e| e.into_app_error())?;
    Ok(Json(service::role_access_matrix(
        &role,
        state.store.buckets(),
        &state.access_config,
    )))
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}/access/{category}",
    params(
        ("id" = String, Path, description = "Role ID"),
        ("category" = String, Path, description = "Permission category")
    ),
    request_body = UpdateAccessGroupDto,
    responses(
        (status = 200, description = "Access updated", body = RoleAccessUpdateResponse),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Role is protected"),
        (status = 404, description = "Role or category not found")
    ),
    tag = "Access"
)]
pub async fn update_category_access(
    State(state): State<AppState>,
    Path((id, category)): Path<(RoleId, String)>,
    ValidatedJson(dto): ValidatedJson<UpdateAccessGroupDto>,
) -> Result<Json<RoleAccessUpdateResponse>, AppError> {
    apply_selections(&state, id, vec![(category, dto.group)]).await
}

#[utoipa::path(
    put,
    path = "/api/roles/{id}/access",
    params(
        ("id" = String, Path, description = "Role ID")
    ),
    request_body = BulkUpdateAccessDto,
    responses(
        (status = 200, description = "Access updated", body = RoleAccessUpdateResponse),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Role is protected"),
        (status = 404, description = "Role or category not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Access"
)]
pub async fn update_role_access(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
    ValidatedJson(dto): ValidatedJson<BulkUpdateAccessDto>,
) -> Result<Json<RoleAccessUpdateResponse>, AppError> {
    let selections = dto
        .selections
        .into_iter()
        .map(|selection| (selection.category, selection.group))
        .collect();
    apply_selections(&state, id, selections).await
}

async fn apply_selections(
    state: &AppState,
    id: RoleId,
    selections: Vec<(String, AccessGroup)>,
) -> Result<Json<RoleAccessUpdateResponse>, AppError> {
    let update = state
        .store
        .update_role_access(id, &selections, &state.access_config)
        .await
        .map_err(|e| e.into_app_error())?;

    info!(
        role = %update.role.name,
        granted = update.change.granted.len(),
        revoked = update.change.revoked.len(),
        "Role access changed"
    );

    let matrix =
        service::role_access_matrix(&update.role, state.store.buckets(), &state.access_config);
    Ok(Json(RoleAccessUpdateResponse {
        role: update.role,
        change: update.change,
        matrix,
    }))
}
