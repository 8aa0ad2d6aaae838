//! In-memory role store.
//!
//! Holds the permission catalog, its category buckets and the current role
//! snapshots. Roles are replaced whole after each access change; nothing is
//! written back to disk.

use std::path::Path;
use std::sync::Arc;

use orgdeck_config::AccessConfig;
use orgdeck_core::AppError;
use orgdeck_core::permissions::{self, DEFAULT_CATALOG};
use orgdeck_models::{
    AccessGroup, CategoryBuckets, Permission, PermissionChange, PermissionId, Role, RoleId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::modules::access::service::{
    apply_groups, build_category_buckets, diff_permissions, is_immutable,
};

/// Well-known role IDs of the built-in dataset.
pub mod default_roles {
    use orgdeck_models::RoleId;

    pub const MEMBER: RoleId = RoleId::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const ADMINISTRATOR: RoleId = RoleId::from_u128(0x00000000_0000_0000_0000_000000000002);
    pub const EDITOR: RoleId = RoleId::from_u128(0x00000000_0000_0000_0000_000000000003);
    pub const VIEWER: RoleId = RoleId::from_u128(0x00000000_0000_0000_0000_000000000004);
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("role {0} not found")]
    RoleNotFound(RoleId),
    #[error("unknown permission category '{0}'")]
    UnknownCategory(String),
    #[error("role '{0}' is protected and cannot be edited")]
    ImmutableRole(String),
}

impl StoreError {
    /// Maps the error onto the HTTP status the API answers with.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::RoleNotFound(_) | StoreError::UnknownCategory(_) => {
                AppError::not_found(self)
            }
            StoreError::ImmutableRole(_) => AppError::forbidden(self),
            StoreError::Io { .. } | StoreError::Parse(_) => AppError::internal(self),
        }
    }
}

/// Catalog plus roles, as loaded from or written to a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDataset {
    pub permissions: Vec<Permission>,
    pub roles: Vec<Role>,
}

impl AccessDataset {
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn role_by_name(&self, name: &str) -> Option<&Role> {
        self.roles
            .iter()
            .find(|role| role.name.eq_ignore_ascii_case(name))
    }

    /// The default catalog with four roles: `member` and `administrator`
    /// (protected), plus custom `editor` and `viewer` roles.
    pub fn builtin() -> Self {
        let catalog: Vec<Permission> = DEFAULT_CATALOG
            .iter()
            .enumerate()
            .map(|(index, (name, description))| {
                Permission::new(PermissionId::from_u128(0x1000 + index as u128), *name)
                    .with_description(*description)
            })
            .collect();

        let pick = |names: &[&str]| -> Vec<Permission> {
            catalog
                .iter()
                .filter(|p| names.contains(&p.name.as_str()))
                .cloned()
                .collect()
        };

        let mut member = Role::new(default_roles::MEMBER, "member", false);
        member.description = Some("Default role for every organisation member".to_string());
        member.permissions = pick(&[permissions::ANNOUNCEMENT_VIEW, permissions::USER_READ]);

        let mut administrator = Role::new(default_roles::ADMINISTRATOR, "administrator", false);
        administrator.description = Some("Full control over the organisation".to_string());
        administrator.permissions = catalog.clone();

        let mut editor = Role::new(default_roles::EDITOR, "editor", true);
        editor.description = Some("Maintains users and announcements".to_string());
        editor.permissions = pick(&[
            permissions::ANNOUNCEMENT_MANAGE,
            permissions::USER_READ,
            permissions::USER_CREATE,
            permissions::USER_EDIT,
            permissions::SETTINGS_VIEW,
        ]);

        let mut viewer = Role::new(default_roles::VIEWER, "viewer", true);
        viewer.description = Some("Read-only access".to_string());
        viewer.permissions = pick(&[
            permissions::ANNOUNCEMENT_VIEW,
            permissions::USER_READ,
            permissions::ORGANISATION_VIEW,
        ]);

        Self {
            permissions: catalog,
            roles: vec![member, administrator, editor, viewer],
        }
    }
}

/// Result of an access update: the new role and what changed.
#[derive(Debug, Clone)]
pub struct RoleUpdate {
    pub role: Role,
    pub change: PermissionChange,
}

#[derive(Clone, Debug)]
pub struct RoleStore {
    permissions: Arc<Vec<Permission>>,
    buckets: Arc<CategoryBuckets>,
    roles: Arc<RwLock<Vec<Role>>>,
}

impl RoleStore {
    pub fn new(dataset: AccessDataset) -> Self {
        let buckets = build_category_buckets(&dataset.permissions);
        info!(
            permissions = dataset.permissions.len(),
            categories = buckets.len(),
            roles = dataset.roles.len(),
            "Role store initialized"
        );

        Self {
            permissions: Arc::new(dataset.permissions),
            buckets: Arc::new(buckets),
            roles: Arc::new(RwLock::new(dataset.roles)),
        }
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn buckets(&self) -> &CategoryBuckets {
        &self.buckets
    }

    pub async fn roles(&self) -> Vec<Role> {
        self.roles.read().await.clone()
    }

    pub async fn role(&self, id: RoleId) -> Result<Role, StoreError> {
        self.roles
            .read()
            .await
            .iter()
            .find(|role| role.id == id)
            .cloned()
            .ok_or(StoreError::RoleNotFound(id))
    }

    /// Applies the selections to the role and stores the result.
    ///
    /// Protected roles and unknown categories are rejected before anything
    /// is changed.
    #[instrument(skip(self, selections, config))]
    pub async fn update_role_access(
        &self,
        id: RoleId,
        selections: &[(String, AccessGroup)],
        config: &AccessConfig,
    ) -> Result<RoleUpdate, StoreError> {
        if let Some((category, _)) = selections
            .iter()
            .find(|(category, _)| !self.buckets.contains_key(category))
        {
            return Err(StoreError::UnknownCategory(category.clone()));
        }

        let mut roles = self.roles.write().await;
        let slot = roles
            .iter_mut()
            .find(|role| role.id == id)
            .ok_or(StoreError::RoleNotFound(id))?;

        if is_immutable(slot, config) {
            return Err(StoreError::ImmutableRole(slot.name.clone()));
        }

        let updated = apply_groups(
            slot,
            selections
                .iter()
                .map(|(category, group)| (category.as_str(), *group)),
            &self.buckets,
            config,
        );
        let change = diff_permissions(slot, &updated);
        debug!(
            role = %updated.name,
            granted = ?change.granted,
            revoked = ?change.revoked,
            "Role access updated"
        );

        *slot = updated.clone();
        Ok(RoleUpdate {
            role: updated,
            change,
        })
    }

    /// Current catalog and roles.
    pub async fn snapshot(&self) -> AccessDataset {
        AccessDataset {
            permissions: self.permissions.as_ref().clone(),
            roles: self.roles().await,
        }
    }
}
