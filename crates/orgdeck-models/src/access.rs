//! Access group models.
//!
//! An [`AccessGroup`] is the simplified level an administrator picks per
//! category. [`CategoryBucket`] is the per-category view of the permission
//! catalog used to translate between groups and concrete permissions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::roles::{Permission, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessGroup {
    Full,
    ReadWrite,
    ReadOnly,
    None,
}

impl AccessGroup {
    pub const ALL: [AccessGroup; 4] = [
        AccessGroup::Full,
        AccessGroup::ReadWrite,
        AccessGroup::ReadOnly,
        AccessGroup::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessGroup::Full => "full",
            AccessGroup::ReadWrite => "readwrite",
            AccessGroup::ReadOnly => "readonly",
            AccessGroup::None => "none",
        }
    }

    /// Badge text shown next to a category.
    pub fn label(&self) -> &'static str {
        match self {
            AccessGroup::Full => "Full",
            AccessGroup::ReadWrite => "Read-Write",
            AccessGroup::ReadOnly => "Read-Only",
            AccessGroup::None => "None",
        }
    }
}

impl fmt::Display for AccessGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAccessGroupError(pub String);

impl fmt::Display for ParseAccessGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown access group '{}', expected one of: full, readwrite, readonly, none",
            self.0
        )
    }
}

impl std::error::Error for ParseAccessGroupError {}

impl FromStr for AccessGroup {
    type Err = ParseAccessGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "full" => Ok(AccessGroup::Full),
            "readwrite" => Ok(AccessGroup::ReadWrite),
            "readonly" => Ok(AccessGroup::ReadOnly),
            "none" => Ok(AccessGroup::None),
            _ => Err(ParseAccessGroupError(s.to_string())),
        }
    }
}

/// The action part of a permission name.
///
/// `read` and `update` are accepted as spellings of `view` and `edit`.
/// Anything else, including a missing action, is kept as `Other` and never
/// counts towards an access group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CrudAction {
    Create,
    View,
    Edit,
    Delete,
    Manage,
    Other(String),
}

impl CrudAction {
    pub fn from_action(action: Option<&str>) -> Self {
        let Some(action) = action else {
            return CrudAction::Other(String::new());
        };
        match action {
            "create" => CrudAction::Create,
            "view" | "read" => CrudAction::View,
            "edit" | "update" => CrudAction::Edit,
            "delete" => CrudAction::Delete,
            "manage" => CrudAction::Manage,
            other => CrudAction::Other(other.to_string()),
        }
    }

    pub fn of(permission: &Permission) -> Self {
        Self::from_action(permission.action_name())
    }

    /// Position in bucket ordering; unknown actions sort after CRUD.
    pub fn sort_rank(&self) -> u8 {
        match self {
            CrudAction::Create => 0,
            CrudAction::View => 1,
            CrudAction::Edit => 2,
            CrudAction::Delete => 3,
            CrudAction::Manage | CrudAction::Other(_) => 4,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CrudAction::Create => "create",
            CrudAction::View => "view",
            CrudAction::Edit => "edit",
            CrudAction::Delete => "delete",
            CrudAction::Manage => "manage",
            CrudAction::Other(action) => action,
        }
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CrudAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ActionPermission {
    #[schema(value_type = String)]
    pub action: CrudAction,
    pub permission: Permission,
}

/// Catalog permissions of one category, split into the optional umbrella
/// `manage` permission and the ordered non-manage actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBucket {
    pub manage_permission: Option<Permission>,
    pub actions: Vec<ActionPermission>,
}

impl CategoryBucket {
    /// First permission registered for `action`, in bucket order.
    pub fn permission_for(&self, action: &CrudAction) -> Option<&Permission> {
        self.actions
            .iter()
            .find(|entry| &entry.action == action)
            .map(|entry| &entry.permission)
    }

    pub fn has_only_manage(&self) -> bool {
        self.manage_permission.is_some() && self.actions.is_empty()
    }
}

/// Buckets keyed by resolved category, iterated in category order.
pub type CategoryBuckets = BTreeMap<String, CategoryBucket>;

/// Human-readable category label: `org_settings` becomes `Org Settings`.
pub fn category_label(category: &str) -> String {
    category
        .split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// DTOs

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PermissionCategory {
    pub category: String,
    pub label: String,
    pub manage_permission: Option<Permission>,
    pub actions: Vec<ActionPermission>,
}

impl PermissionCategory {
    pub fn from_bucket(category: &str, bucket: &CategoryBucket) -> Self {
        Self {
            category: category.to_string(),
            label: category_label(category),
            manage_permission: bucket.manage_permission.clone(),
            actions: bucket.actions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryAccess {
    pub category: String,
    pub label: String,
    pub group: AccessGroup,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleAccessMatrix {
    pub role_id: crate::ids::RoleId,
    pub role_name: String,
    /// `true` for protected roles whose permissions cannot be edited
    pub immutable: bool,
    pub categories: Vec<CategoryAccess>,
}

/// Permission names added and removed by an access change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionChange {
    pub granted: Vec<String>,
    pub revoked: Vec<String>,
}

impl PermissionChange {
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.revoked.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AccessSelection {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,
    pub group: AccessGroup,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccessGroupDto {
    pub group: AccessGroup,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BulkUpdateAccessDto {
    #[validate(length(min = 1, message = "At least one selection is required"), nested)]
    pub selections: Vec<AccessSelection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleAccessUpdateResponse {
    pub role: Role,
    pub change: PermissionChange,
    pub matrix: RoleAccessMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PermissionId;

    #[test]
    fn test_access_group_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&AccessGroup::ReadWrite).unwrap(),
            r#""readwrite""#
        );
        let group: AccessGroup = serde_json::from_str(r#""readonly""#).unwrap();
        assert_eq!(group, AccessGroup::ReadOnly);
        assert!(serde_json::from_str::<AccessGroup>(r#""admin""#).is_err());
    }

    #[test]
    fn test_access_group_from_str_accepts_spellings() {
        assert_eq!("Read-Write".parse::<AccessGroup>(), Ok(AccessGroup::ReadWrite));
        assert_eq!("read_only".parse::<AccessGroup>(), Ok(AccessGroup::ReadOnly));
        assert_eq!(" FULL ".parse::<AccessGroup>(), Ok(AccessGroup::Full));
        assert!("everything".parse::<AccessGroup>().is_err());
    }

    #[test]
    fn test_access_group_display_round_trips() {
        for group in AccessGroup::ALL {
            assert_eq!(group.to_string().parse::<AccessGroup>(), Ok(group));
        }
    }

    #[test]
    fn test_crud_action_aliases() {
        assert_eq!(CrudAction::from_action(Some("read")), CrudAction::View);
        assert_eq!(CrudAction::from_action(Some("update")), CrudAction::Edit);
        assert_eq!(CrudAction::from_action(Some("manage")), CrudAction::Manage);
        assert_eq!(
            CrudAction::from_action(Some("export")),
            CrudAction::Other("export".to_string())
        );
        assert_eq!(
            CrudAction::from_action(None),
            CrudAction::Other(String::new())
        );
    }

    #[test]
    fn test_crud_action_is_case_sensitive() {
        assert_eq!(
            CrudAction::from_action(Some("View")),
            CrudAction::Other("View".to_string())
        );
    }

    #[test]
    fn test_crud_action_sort_rank() {
        let mut actions = vec![
            CrudAction::Other("export".to_string()),
            CrudAction::Delete,
            CrudAction::View,
            CrudAction::Create,
            CrudAction::Edit,
        ];
        actions.sort_by_key(CrudAction::sort_rank);
        assert_eq!(
            actions,
            vec![
                CrudAction::Create,
                CrudAction::View,
                CrudAction::Edit,
                CrudAction::Delete,
                CrudAction::Other("export".to_string()),
            ]
        );
    }

    #[test]
    fn test_bucket_has_only_manage() {
        let manage = Permission::new(PermissionId::from_u128(1), "billing:manage");
        let bucket = CategoryBucket {
            manage_permission: Some(manage),
            actions: vec![],
        };
        assert!(bucket.has_only_manage());
        assert!(!CategoryBucket::default().has_only_manage());
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("announcement"), "Announcement");
        assert_eq!(category_label("org_settings"), "Org Settings");
        assert_eq!(category_label("audit-log"), "Audit Log");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn test_bulk_update_requires_selection() {
        let dto = BulkUpdateAccessDto { selections: vec![] };
        assert!(dto.validate().is_err());

        let dto = BulkUpdateAccessDto {
            selections: vec![AccessSelection {
                category: String::new(),
                group: AccessGroup::None,
            }],
        };
        assert!(dto.validate().is_err());

        let dto = BulkUpdateAccessDto {
            selections: vec![AccessSelection {
                category: "user".to_string(),
                group: AccessGroup::ReadOnly,
            }],
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_bulk_update_reports_nested_selection_errors() {
        let dto: BulkUpdateAccessDto = serde_json::from_str(
            r#"{"selections": [{"category": "user", "group": "full"}, {"category": "", "group": "none"}]}"#,
        )
        .unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors.errors().contains_key("selections"));

        let json = serde_json::to_value(&dto.selections[0]).unwrap();
        assert_eq!(json, serde_json::json!({"category": "user", "group": "full"}));
    }
}
