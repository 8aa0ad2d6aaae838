//! Access group derivation and application.
//!
//! Every function here is pure: roles go in by reference and updated roles
//! come back as new values. Callers editing the same role several times must
//! feed each returned role into the next call (see [`apply_groups`]).

use std::collections::{BTreeSet, HashSet};

use orgdeck_config::AccessConfig;
use orgdeck_models::{
    AccessGroup, ActionPermission, CategoryAccess, CategoryBucket, CategoryBuckets, CrudAction,
    Permission, PermissionChange, Role, RoleAccessMatrix, category_label,
};
use tracing::debug;

pub const NO_ACCESS_SUMMARY: &str = "No access";

/// Groups the permission catalog by resolved category.
///
/// A `manage` permission becomes the bucket's umbrella permission (the first
/// one wins if a catalog lists several); every other permission is kept as an
/// action, ordered create, view, edit, delete, then unknown actions in
/// catalog order.
pub fn build_category_buckets(catalog: &[Permission]) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::new();

    for permission in catalog {
        let bucket = buckets
            .entry(permission.resolved_category().to_string())
            .or_default();

        match CrudAction::of(permission) {
            CrudAction::Manage => {
                if bucket.manage_permission.is_none() {
                    bucket.manage_permission = Some(permission.clone());
                }
            }
            action => bucket.actions.push(ActionPermission {
                action,
                permission: permission.clone(),
            }),
        }
    }

    for bucket in buckets.values_mut() {
        // sort_by_key is stable, so unknown actions keep catalog order
        bucket.actions.sort_by_key(|entry| entry.action.sort_rank());
    }

    buckets
}

pub fn is_immutable(role: &Role, config: &AccessConfig) -> bool {
    config.is_immutable_role(&role.name)
}

#[derive(Debug, Default, Clone, Copy)]
struct HeldActions {
    create: bool,
    view: bool,
    edit: bool,
    delete: bool,
}

impl HeldActions {
    fn collect(role: &Role, bucket: &CategoryBucket) -> Self {
        let held: HashSet<&str> = role.permissions.iter().map(|p| p.name.as_str()).collect();
        let mut actions = Self::default();

        for entry in &bucket.actions {
            if !held.contains(entry.permission.name.as_str()) {
                continue;
            }
            match entry.action {
                CrudAction::Create => actions.create = true,
                CrudAction::View => actions.view = true,
                CrudAction::Edit => actions.edit = true,
                CrudAction::Delete => actions.delete = true,
                CrudAction::Manage | CrudAction::Other(_) => {}
            }
        }

        actions
    }

    fn is_empty(&self) -> bool {
        !(self.create || self.view || self.edit || self.delete)
    }

    fn is_complete(&self) -> bool {
        self.create && self.view && self.edit && self.delete
    }
}

fn holds_manage(role: &Role, bucket: &CategoryBucket) -> bool {
    bucket
        .manage_permission
        .as_ref()
        .is_some_and(|manage| role.has_permission(&manage.name))
}

/// Classifies the role's permissions in `category` into an access group.
///
/// Rules are checked in order, first match wins:
///
/// 1. holds `manage`, or all four CRUD actions: `Full`
/// 2. view plus create or edit, and no delete unless read-write includes it: `ReadWrite`
/// 3. view and nothing else: `ReadOnly`
/// 4. nothing at all: `None`
/// 5. otherwise `ReadWrite` if view is held, else `None`
///
/// A category without a bucket classifies as `None`.
pub fn classify(
    role: &Role,
    category: &str,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> AccessGroup {
    let Some(bucket) = buckets.get(category) else {
        return AccessGroup::None;
    };

    let crud = HeldActions::collect(role, bucket);
    let has_manage = holds_manage(role, bucket);

    if has_manage || crud.is_complete() {
        return AccessGroup::Full;
    }

    if crud.view
        && (crud.create || crud.edit)
        && (!crud.delete || config.readwrite_includes_delete)
    {
        return AccessGroup::ReadWrite;
    }

    if crud.view && !crud.create && !crud.edit && !crud.delete {
        return AccessGroup::ReadOnly;
    }

    if crud.is_empty() {
        return AccessGroup::None;
    }

    if crud.view {
        AccessGroup::ReadWrite
    } else {
        AccessGroup::None
    }
}

/// Returns a copy of `role` whose `category` permissions match `group`.
///
/// All of the role's permissions in `category` are removed first, then the
/// permissions representing `group` are granted. Actions missing from the
/// catalog are skipped. Permissions in other categories are left untouched.
/// Protected roles come back unchanged.
pub fn apply_group(
    role: &Role,
    category: &str,
    group: AccessGroup,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> Role {
    if is_immutable(role, config) {
        debug!(role = %role.name, category, %group, "Skipping access change on protected role");
        return role.clone();
    }

    let mut updated = role.clone();
    updated
        .permissions
        .retain(|permission| permission.resolved_category() != category);

    let Some(bucket) = buckets.get(category) else {
        return updated;
    };

    for permission in grants_for(bucket, group, config) {
        updated.grant(permission.clone());
    }

    updated
}

fn grants_for<'a>(
    bucket: &'a CategoryBucket,
    group: AccessGroup,
    config: &AccessConfig,
) -> Vec<&'a Permission> {
    match group {
        AccessGroup::None => Vec::new(),
        AccessGroup::Full => match &bucket.manage_permission {
            Some(manage) => vec![manage],
            None => bucket.actions.iter().map(|entry| &entry.permission).collect(),
        },
        AccessGroup::ReadOnly => bucket.permission_for(&CrudAction::View).into_iter().collect(),
        AccessGroup::ReadWrite => {
            let mut slots = vec![CrudAction::View, CrudAction::Create, CrudAction::Edit];
            if config.readwrite_includes_delete {
                slots.push(CrudAction::Delete);
            }
            slots
                .iter()
                .filter_map(|action| bucket.permission_for(action))
                .collect()
        }
    }
}

/// Applies several `(category, group)` selections in order.
pub fn apply_groups<I, S>(
    role: &Role,
    selections: I,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> Role
where
    I: IntoIterator<Item = (S, AccessGroup)>,
    S: AsRef<str>,
{
    selections
        .into_iter()
        .fold(role.clone(), |current, (category, group)| {
            apply_group(&current, category.as_ref(), group, buckets, config)
        })
}

/// Lowercase description of what the role can do in `category`.
pub fn summarize(
    role: &Role,
    category: &str,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> String {
    let group = classify(role, category, buckets, config);
    if group == AccessGroup::None {
        return NO_ACCESS_SUMMARY.to_string();
    }

    let bucket = buckets.get(category);
    if bucket.is_some_and(CategoryBucket::has_only_manage) {
        return "manage".to_string();
    }

    let summary = match group {
        AccessGroup::Full => {
            if bucket.is_some_and(|b| b.manage_permission.is_some()) {
                "manage"
            } else {
                "create, view, edit, delete"
            }
        }
        AccessGroup::ReadOnly => "view",
        AccessGroup::ReadWrite => {
            if config.readwrite_includes_delete {
                "view, create, edit, delete"
            } else {
                "view, create, edit"
            }
        }
        AccessGroup::None => NO_ACCESS_SUMMARY,
    };

    summary.to_string()
}

/// Group and summary for every catalog category, in category order.
pub fn access_matrix(
    role: &Role,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> Vec<CategoryAccess> {
    buckets
        .keys()
        .map(|category| CategoryAccess {
            category: category.clone(),
            label: category_label(category),
            group: classify(role, category, buckets, config),
            summary: summarize(role, category, buckets, config),
        })
        .collect()
}

pub fn role_access_matrix(
    role: &Role,
    buckets: &CategoryBuckets,
    config: &AccessConfig,
) -> RoleAccessMatrix {
    RoleAccessMatrix {
        role_id: role.id,
        role_name: role.name.clone(),
        immutable: is_immutable(role, config),
        categories: access_matrix(role, buckets, config),
    }
}

/// Permission names granted and revoked between two snapshots of a role.
pub fn diff_permissions(before: &Role, after: &Role) -> PermissionChange {
    let before: BTreeSet<&str> = before.permissions.iter().map(|p| p.name.as_str()).collect();
    let after: BTreeSet<&str> = after.permissions.iter().map(|p| p.name.as_str()).collect();

    PermissionChange {
        granted: after.difference(&before).map(|s| s.to_string()).collect(),
        revoked: before.difference(&after).map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdeck_models::{PermissionId, RoleId};

    fn permission(n: u128, name: &str) -> Permission {
        Permission::new(PermissionId::from_u128(n), name)
    }

    fn custom_role(name: &str, permissions: Vec<Permission>) -> Role {
        let mut role = Role::new(RoleId::from_u128(100), name, true);
        for p in permissions {
            role.grant(p);
        }
        role
    }

    fn action_names(bucket: &CategoryBucket) -> Vec<&str> {
        bucket
            .actions
            .iter()
            .map(|entry| entry.permission.name.as_str())
            .collect()
    }

    #[test]
    fn test_buckets_sort_actions() {
        let catalog = vec![
            permission(1, "user:export"),
            permission(2, "user:delete"),
            permission(3, "user:edit"),
            permission(4, "user:read"),
            permission(5, "user:import"),
            permission(6, "user:create"),
        ];
        let buckets = build_category_buckets(&catalog);
        let bucket = &buckets["user"];

        assert_eq!(
            action_names(bucket),
            vec![
                "user:create",
                "user:read",
                "user:edit",
                "user:delete",
                "user:export",
                "user:import"
            ]
        );
        assert!(bucket.manage_permission.is_none());
    }

    #[test]
    fn test_buckets_separate_manage() {
        let catalog = vec![
            permission(1, "announcement:manage"),
            permission(2, "announcement:view"),
        ];
        let buckets = build_category_buckets(&catalog);
        let bucket = &buckets["announcement"];

        assert_eq!(
            bucket.manage_permission.as_ref().map(|p| p.name.as_str()),
            Some("announcement:manage")
        );
        assert_eq!(action_names(bucket), vec!["announcement:view"]);
    }

    #[test]
    fn test_buckets_first_manage_wins() {
        let catalog = vec![
            permission(1, "billing:manage"),
            permission(2, "invoices:manage").with_category("billing"),
        ];
        let buckets = build_category_buckets(&catalog);
        assert_eq!(
            buckets["billing"].manage_permission.as_ref().map(|p| p.id),
            Some(PermissionId::from_u128(1))
        );
    }

    #[test]
    fn test_buckets_manage_only_category_present() {
        let buckets = build_category_buckets(&[permission(1, "billing:manage")]);
        assert!(buckets["billing"].has_only_manage());
    }

    #[test]
    fn test_buckets_use_explicit_category() {
        let catalog = vec![permission(1, "news:view").with_category("announcement")];
        let buckets = build_category_buckets(&catalog);
        assert!(buckets.contains_key("announcement"));
        assert!(!buckets.contains_key("news"));
    }

    #[test]
    fn test_buckets_malformed_name_is_unknown_action() {
        let buckets = build_category_buckets(&[permission(1, "superuser")]);
        let bucket = &buckets["superuser"];
        assert_eq!(bucket.actions.len(), 1);
        assert_eq!(bucket.actions[0].action, CrudAction::Other(String::new()));
    }

    #[test]
    fn test_buckets_empty_catalog() {
        assert!(build_category_buckets(&[]).is_empty());
    }

    #[test]
    fn test_classify_unknown_category_is_none() {
        let role = custom_role("editor", vec![permission(1, "user:read")]);
        let buckets = build_category_buckets(&[permission(1, "user:read")]);
        let config = AccessConfig::default();
        assert_eq!(classify(&role, "billing", &buckets, &config), AccessGroup::None);
    }

    #[test]
    fn test_classify_view_and_delete_falls_back_to_readwrite() {
        let catalog = vec![
            permission(1, "user:view"),
            permission(2, "user:delete"),
            permission(3, "user:create"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", vec![catalog[0].clone(), catalog[1].clone()]);
        let config = AccessConfig::default();

        assert_eq!(classify(&role, "user", &buckets, &config), AccessGroup::ReadWrite);
    }

    #[test]
    fn test_classify_create_without_view_is_none() {
        let catalog = vec![permission(1, "user:view"), permission(2, "user:create")];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", vec![catalog[1].clone()]);
        let config = AccessConfig::default();

        assert_eq!(classify(&role, "user", &buckets, &config), AccessGroup::None);
        assert_eq!(summarize(&role, "user", &buckets, &config), NO_ACCESS_SUMMARY);
    }

    #[test]
    fn test_classify_readwrite_with_delete_when_configured() {
        let catalog = vec![
            permission(1, "user:view"),
            permission(2, "user:edit"),
            permission(3, "user:delete"),
            permission(4, "user:create"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", catalog[..3].to_vec());

        let strict = AccessConfig::default();
        let lenient = AccessConfig {
            readwrite_includes_delete: true,
            ..AccessConfig::default()
        };

        // view + edit + delete: step 5 fallback without the flag, step 2 with it
        assert_eq!(classify(&role, "user", &buckets, &strict), AccessGroup::ReadWrite);
        assert_eq!(classify(&role, "user", &buckets, &lenient), AccessGroup::ReadWrite);
        assert_eq!(
            summarize(&role, "user", &buckets, &lenient),
            "view, create, edit, delete"
        );
    }

    #[test]
    fn test_classify_ignores_unknown_actions() {
        let catalog = vec![permission(1, "report:view"), permission(2, "report:export")];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("analyst", catalog.clone());
        let config = AccessConfig::default();

        assert_eq!(classify(&role, "report", &buckets, &config), AccessGroup::ReadOnly);
    }

    #[test]
    fn test_apply_full_without_manage_grants_all_actions() {
        let catalog = vec![
            permission(1, "report:view"),
            permission(2, "report:export"),
            permission(3, "report:create"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("analyst", vec![]);
        let config = AccessConfig::default();

        let updated = apply_group(&role, "report", AccessGroup::Full, &buckets, &config);
        assert_eq!(
            updated.permission_names(),
            vec!["report:create", "report:view", "report:export"]
        );
    }

    #[test]
    fn test_apply_readonly_without_view_clears_category() {
        let catalog = vec![permission(1, "billing:manage")];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("finance", catalog.clone());
        let config = AccessConfig::default();

        let updated = apply_group(&role, "billing", AccessGroup::ReadOnly, &buckets, &config);
        assert!(updated.permissions.is_empty());
    }

    #[test]
    fn test_apply_readwrite_includes_delete_when_configured() {
        let catalog = vec![
            permission(1, "user:read"),
            permission(2, "user:create"),
            permission(3, "user:update"),
            permission(4, "user:delete"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", vec![]);
        let config = AccessConfig {
            readwrite_includes_delete: true,
            ..AccessConfig::default()
        };

        let updated = apply_group(&role, "user", AccessGroup::ReadWrite, &buckets, &config);
        assert_eq!(
            updated.permission_names(),
            vec!["user:read", "user:create", "user:update", "user:delete"]
        );
        // all four CRUD actions held means full access
        assert_eq!(classify(&updated, "user", &buckets, &config), AccessGroup::Full);
    }

    #[test]
    fn test_apply_unknown_category_only_clears() {
        let role = custom_role("editor", vec![permission(1, "legacy:view")]);
        let buckets = build_category_buckets(&[]);
        let config = AccessConfig::default();

        let updated = apply_group(&role, "legacy", AccessGroup::Full, &buckets, &config);
        assert!(updated.permissions.is_empty());
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let catalog = vec![permission(1, "user:read")];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", vec![]);
        let config = AccessConfig::default();

        let _ = apply_group(&role, "user", AccessGroup::ReadOnly, &buckets, &config);
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn test_apply_groups_composes_in_order() {
        let catalog = vec![
            permission(1, "user:read"),
            permission(2, "user:create"),
            permission(3, "settings:view"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("editor", vec![]);
        let config = AccessConfig::default();

        let updated = apply_groups(
            &role,
            [
                ("user", AccessGroup::ReadWrite),
                ("settings", AccessGroup::ReadOnly),
                ("user", AccessGroup::ReadOnly),
            ],
            &buckets,
            &config,
        );
        assert_eq!(updated.permission_names(), vec!["settings:view", "user:read"]);
    }

    #[test]
    fn test_summarize_manage_only_bucket() {
        let catalog = vec![permission(1, "billing:manage")];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("finance", catalog.clone());
        let config = AccessConfig::default();

        assert_eq!(summarize(&role, "billing", &buckets, &config), "manage");
    }

    #[test]
    fn test_diff_permissions() {
        let before = custom_role(
            "editor",
            vec![permission(1, "user:read"), permission(2, "user:delete")],
        );
        let after = custom_role(
            "editor",
            vec![permission(1, "user:read"), permission(3, "user:create")],
        );

        let change = diff_permissions(&before, &after);
        assert_eq!(change.granted, vec!["user:create"]);
        assert_eq!(change.revoked, vec!["user:delete"]);
        assert!(diff_permissions(&before, &before).is_empty());
    }

    #[test]
    fn test_access_matrix_covers_every_category() {
        let catalog = vec![
            permission(1, "user:read"),
            permission(2, "billing:manage"),
            permission(3, "audit_log:view"),
        ];
        let buckets = build_category_buckets(&catalog);
        let role = custom_role("auditor", vec![catalog[2].clone()]);
        let config = AccessConfig::default();

        let matrix = access_matrix(&role, &buckets, &config);
        let categories: Vec<&str> = matrix.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["audit_log", "billing", "user"]);
        assert_eq!(matrix[0].label, "Audit Log");
        assert_eq!(matrix[0].group, AccessGroup::ReadOnly);
        assert_eq!(matrix[0].summary, "view");
        assert_eq!(matrix[1].group, AccessGroup::None);
    }

    #[test]
    fn test_role_access_matrix_flags_protected_roles() {
        let buckets = build_category_buckets(&[permission(1, "user:read")]);
        let config = AccessConfig::default();

        let member = Role::new(RoleId::from_u128(1), "Member", false);
        assert!(role_access_matrix(&member, &buckets, &config).immutable);

        let editor = custom_role("editor", vec![]);
        assert!(!role_access_matrix(&editor, &buckets, &config).immutable);
    }
}
