use orgdeck_core::AppError;
use orgdeck_models::{Permission, PermissionCategory, Role, RoleId};
use tracing::instrument;

use crate::store::RoleStore;

pub fn get_all_permissions(store: &RoleStore, category: Option<&str>) -> Vec<Permission> {
    store
        .permissions()
        .iter()
        .filter(|p| category.is_none_or(|c| p.resolved_category() == c))
        .cloned()
        .collect()
}

pub fn get_permission_categories(store: &RoleStore) -> Vec<PermissionCategory> {
    store
        .buckets()
        .iter()
        .map(|(category, bucket)| PermissionCategory::from_bucket(category, bucket))
        .collect()
}

#[instrument(skip(store))]
pub async fn get_roles(store: &RoleStore, is_custom: Option<bool>) -> Vec<Role> {
    store
        .roles()
        .await
        .into_iter()
        .filter(|role| is_custom.is_none_or(|custom| role.is_custom == custom))
        .collect()
}

#[instrument(skip(store))]
pub async fn get_role_by_id(store: &RoleStore, id: RoleId) -> Result<Role, AppError> {
    store.role(id).await.map_err(|e| e.into_app_error())
}
