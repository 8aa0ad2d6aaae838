//! Offline commands behind `orgdeck-cli`.
//!
//! Each command works on an [`AccessDataset`] loaded from a JSON file (or the
//! built-in dataset) and returns text for the binary to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use orgdeck_config::AccessConfig;
use orgdeck_models::{AccessGroup, PermissionChange, Role};

use crate::modules::access::service::{
    access_matrix, apply_group, build_category_buckets, diff_permissions, is_immutable,
};
use crate::store::AccessDataset;

pub fn load_dataset(path: Option<&Path>) -> Result<AccessDataset> {
    match path {
        Some(path) => AccessDataset::load(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        None => Ok(AccessDataset::builtin()),
    }
}

pub fn write_dataset(dataset: &AccessDataset, path: &Path) -> Result<()> {
    let json = dataset.to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn category_names(dataset: &AccessDataset) -> Vec<String> {
    build_category_buckets(&dataset.permissions)
        .into_keys()
        .collect()
}

pub fn render_categories(dataset: &AccessDataset) -> String {
    let buckets = build_category_buckets(&dataset.permissions);
    let mut out = String::new();

    for (category, bucket) in &buckets {
        let _ = writeln!(out, "{category}");
        if let Some(manage) = &bucket.manage_permission {
            let _ = writeln!(out, "  manage    {}", manage.name);
        }
        for entry in &bucket.actions {
            let _ = writeln!(out, "  {:<9} {}", entry.action.to_string(), entry.permission.name);
        }
    }

    out
}

fn render_role(out: &mut String, role: &Role, dataset: &AccessDataset, config: &AccessConfig) {
    let buckets = build_category_buckets(&dataset.permissions);
    let kind = if is_immutable(role, config) {
        "protected"
    } else if role.is_custom {
        "custom"
    } else {
        "built-in"
    };

    let _ = writeln!(out, "Role: {} ({kind})", role.name);
    let _ = writeln!(out, "  {:<20} {:<10} ACTIONS", "CATEGORY", "GROUP");
    for access in access_matrix(role, &buckets, config) {
        let _ = writeln!(
            out,
            "  {:<20} {:<10} {}",
            access.label,
            access.group.as_str(),
            access.summary
        );
    }
}

/// Access table for one role, or for every role when `role_name` is `None`.
pub fn render_matrix(
    dataset: &AccessDataset,
    role_name: Option<&str>,
    config: &AccessConfig,
) -> Result<String> {
    let roles: Vec<&Role> = match role_name {
        Some(name) => vec![find_role(dataset, name)?],
        None => dataset.roles.iter().collect(),
    };

    let mut out = String::new();
    for (index, role) in roles.into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_role(&mut out, role, dataset, config);
    }
    Ok(out)
}

fn find_role<'a>(dataset: &'a AccessDataset, name: &str) -> Result<&'a Role> {
    dataset
        .role_by_name(name)
        .with_context(|| format!("Role '{name}' not found"))
}

/// Sets `category` on the named role to `group` and returns the change.
///
/// Unlike the engine, which silently skips protected roles, this refuses
/// them so the user sees why nothing happened.
pub fn apply_access(
    dataset: &mut AccessDataset,
    role_name: &str,
    category: &str,
    group: AccessGroup,
    config: &AccessConfig,
) -> Result<PermissionChange> {
    let buckets = build_category_buckets(&dataset.permissions);
    if !buckets.contains_key(category) {
        bail!("Unknown category '{category}'");
    }

    let role = find_role(dataset, role_name)?;
    if is_immutable(role, config) {
        bail!("Role '{}' is protected and cannot be edited", role.name);
    }

    let updated = apply_group(role, category, group, &buckets, config);
    let change = diff_permissions(role, &updated);

    let id = updated.id;
    if let Some(slot) = dataset.roles.iter_mut().find(|r| r.id == id) {
        *slot = updated;
    }

    Ok(change)
}

pub fn render_change(change: &PermissionChange) -> String {
    if change.is_empty() {
        return "No changes".to_string();
    }

    let mut out = String::new();
    for name in &change.granted {
        let _ = writeln!(out, "+ {name}");
    }
    for name in &change.revoked {
        let _ = writeln!(out, "- {name}");
    }
    out
}
