//! Permission naming for orgdeck.
//!
//! Permission names follow `<category>:<action>`, e.g. `announcement:manage`.
//! This module holds the parser for that format and the well-known permission
//! constants that make up the default catalog.
//!
//! # Example
//!
//! ```
//! use orgdeck_core::permissions::{self, parse_permission_name};
//!
//! let parsed = parse_permission_name(permissions::USER_CREATE);
//! assert_eq!(parsed.category, "user");
//! assert_eq!(parsed.action, Some("create"));
//! ```

/// A permission name split into its category and action parts.
///
/// `action` is `None` when the name has no `:` separator. Such names still
/// resolve to a category (the whole name) but never match a known action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionName<'a> {
    pub category: &'a str,
    pub action: Option<&'a str>,
}

/// Splits a permission name on its first `:`.
pub fn parse_permission_name(name: &str) -> PermissionName<'_> {
    match name.split_once(':') {
        Some((category, action)) => PermissionName {
            category,
            action: Some(action),
        },
        None => PermissionName {
            category: name,
            action: None,
        },
    }
}

// =============================================================================
// Announcements
// =============================================================================

/// Permission to read announcements
pub const ANNOUNCEMENT_VIEW: &str = "announcement:view";
/// Permission to publish, edit and retract announcements
pub const ANNOUNCEMENT_MANAGE: &str = "announcement:manage";

// =============================================================================
// Users
// =============================================================================

/// Permission to read users
pub const USER_READ: &str = "user:read";
/// Permission to invite users
pub const USER_CREATE: &str = "user:create";
/// Permission to update users
pub const USER_EDIT: &str = "user:edit";
/// Permission to remove users
pub const USER_DELETE: &str = "user:delete";

// =============================================================================
// Organisations
// =============================================================================

/// Permission to read organisations
pub const ORGANISATION_VIEW: &str = "organisation:view";
/// Permission to create organisations
pub const ORGANISATION_CREATE: &str = "organisation:create";
/// Permission to update organisations
pub const ORGANISATION_EDIT: &str = "organisation:edit";
/// Permission to delete organisations
pub const ORGANISATION_DELETE: &str = "organisation:delete";
/// Permission covering every organisation action
pub const ORGANISATION_MANAGE: &str = "organisation:manage";

// =============================================================================
// Roles
// =============================================================================

/// Permission to read roles
pub const ROLE_VIEW: &str = "role:view";
/// Permission to create custom roles
pub const ROLE_CREATE: &str = "role:create";
/// Permission to update custom roles
pub const ROLE_EDIT: &str = "role:edit";
/// Permission to delete custom roles
pub const ROLE_DELETE: &str = "role:delete";

// =============================================================================
// Settings
// =============================================================================

/// Permission to read settings
pub const SETTINGS_VIEW: &str = "settings:view";
/// Permission to change settings
pub const SETTINGS_MANAGE: &str = "settings:manage";

// =============================================================================
// Billing
// =============================================================================

/// Permission to manage billing (no finer-grained actions exist)
pub const BILLING_MANAGE: &str = "billing:manage";

/// Name and description of every permission in the default catalog.
pub const DEFAULT_CATALOG: &[(&str, &str)] = &[
    (ANNOUNCEMENT_VIEW, "Read announcements"),
    (ANNOUNCEMENT_MANAGE, "Publish, edit and retract announcements"),
    (USER_READ, "Read users"),
    (USER_CREATE, "Invite users"),
    (USER_EDIT, "Update users"),
    (USER_DELETE, "Remove users"),
    (ORGANISATION_VIEW, "Read organisations"),
    (ORGANISATION_CREATE, "Create organisations"),
    (ORGANISATION_EDIT, "Update organisations"),
    (ORGANISATION_DELETE, "Delete organisations"),
    (ORGANISATION_MANAGE, "Full control over organisations"),
    (ROLE_VIEW, "Read roles"),
    (ROLE_CREATE, "Create custom roles"),
    (ROLE_EDIT, "Update custom roles"),
    (ROLE_DELETE, "Delete custom roles"),
    (SETTINGS_VIEW, "Read settings"),
    (SETTINGS_MANAGE, "Change settings"),
    (BILLING_MANAGE, "Manage billing"),
];
