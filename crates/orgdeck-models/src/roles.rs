//! Role and permission domain models.

use crate::ids::{PermissionId, RoleId};
use orgdeck_core::parse_permission_name;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Permission {
    pub id: PermissionId,
    /// `<category>:<action>`, e.g. `announcement:manage`
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit category; when absent the category is parsed from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Permission {
    pub fn new(id: PermissionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The explicit category if set, otherwise the part of `name` before `:`.
    pub fn resolved_category(&self) -> &str {
        self.category
            .as_deref()
            .unwrap_or_else(|| parse_permission_name(&self.name).category)
    }

    /// The raw action text after `:`, if any.
    pub fn action_name(&self) -> Option<&str> {
        parse_permission_name(&self.name).action
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(id: RoleId, name: impl Into<String>, is_custom: bool) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            is_custom,
            permissions: Vec::new(),
        }
    }

    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }

    /// Adds a permission unless one with the same name is already held.
    ///
    /// Returns `true` if the permission was added.
    pub fn grant(&mut self, permission: Permission) -> bool {
        if self.has_permission(&permission.name) {
            return false;
        }
        self.permissions.push(permission);
        true
    }

    /// Permissions held for `category`, matched by resolved category.
    pub fn permissions_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Permission> {
        self.permissions
            .iter()
            .filter(move |p| p.resolved_category() == category)
    }

    pub fn permission_names(&self) -> Vec<&str> {
        self.permissions.iter().map(|p| p.name.as_str()).collect()
    }
}
