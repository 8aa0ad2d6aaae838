use std::sync::atomic::{AtomicU64, Ordering};

use orgdeck_models::{Permission, PermissionId, Role, RoleId};

static NEXT_ID: AtomicU64 = AtomicU64::new(0x5000);

fn next_id() -> u128 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed) as u128
}

/// Build a catalog from permission names, assigning fresh IDs.
pub fn catalog(names: &[&str]) -> Vec<Permission> {
    names
        .iter()
        .map(|name| Permission::new(PermissionId::from_u128(next_id()), *name))
        .collect()
}

/// Catalog entries whose names start with `category:`.
#[allow(dead_code)]
pub fn in_category(catalog: &[Permission], category: &str) -> Vec<Permission> {
    catalog
        .iter()
        .filter(|p| p.resolved_category() == category)
        .cloned()
        .collect()
}

/// Custom role holding the named catalog permissions.
pub fn custom_role(name: &str, catalog: &[Permission], held: &[&str]) -> Role {
    let mut role = Role::new(RoleId::from_u128(next_id()), name, true);
    role.permissions = pick(catalog, held);
    role
}

/// Built-in (non-custom) role holding the named catalog permissions.
#[allow(dead_code)]
pub fn system_role(name: &str, catalog: &[Permission], held: &[&str]) -> Role {
    let mut role = Role::new(RoleId::from_u128(next_id()), name, false);
    role.permissions = pick(catalog, held);
    role
}

pub fn pick(catalog: &[Permission], names: &[&str]) -> Vec<Permission> {
    names
        .iter()
        .map(|name| {
            catalog
                .iter()
                .find(|p| p.name == *name)
                .cloned()
                .unwrap_or_else(|| panic!("{name} is not in the test catalog"))
        })
        .collect()
}

/// Sorted permission names held by the role.
#[allow(dead_code)]
pub fn held_names(role: &Role) -> Vec<String> {
    let mut names: Vec<String> = role.permissions.iter().map(|p| p.name.clone()).collect();
    names.sort();
    names
}
