//! Access matrix configuration.
//!
//! Two values shape how simplified access groups map onto permissions:
//!
//! - `ACCESS_READWRITE_INCLUDES_DELETE`: whether the read-write group grants
//!   (and tolerates) the `delete` action (default: `false`)
//! - `ACCESS_IMMUTABLE_ROLES`: comma-separated role names protected in
//!   addition to `member` and `administrator`, which are always protected
//!   (default: none)
//!
//! Both are read once at startup and never change while the process runs.

use tracing::warn;

/// Role names that are always protected from permission edits.
pub const DEFAULT_IMMUTABLE_ROLES: &[&str] = &["member", "administrator"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessConfig {
    /// When `true`, read-write grants `delete` alongside view/create/edit.
    pub readwrite_includes_delete: bool,

    /// Lowercased names of extra protected roles. [`DEFAULT_IMMUTABLE_ROLES`]
    /// are checked regardless of this list.
    pub immutable_roles: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            readwrite_includes_delete: false,
            immutable_roles: Vec::new(),
        }
    }
}

impl AccessConfig {
    /// Creates a new `AccessConfig` from environment variables.
    ///
    /// Falls back to defaults for missing or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let readwrite_includes_delete = match lookup("ACCESS_READWRITE_INCLUDES_DELETE") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!(
                    value = %raw,
                    "Invalid ACCESS_READWRITE_INCLUDES_DELETE, using default"
                );
                defaults.readwrite_includes_delete
            }),
            None => defaults.readwrite_includes_delete,
        };

        let immutable_roles = lookup("ACCESS_IMMUTABLE_ROLES")
            .map(|raw| parse_role_list(&raw))
            .unwrap_or(defaults.immutable_roles);

        Self {
            readwrite_includes_delete,
            immutable_roles,
        }
    }

    /// Returns `true` if `role_name` is protected, ignoring case.
    pub fn is_immutable_role(&self, role_name: &str) -> bool {
        DEFAULT_IMMUTABLE_ROLES
            .iter()
            .copied()
            .chain(self.immutable_roles.iter().map(String::as_str))
            .any(|protected| protected.eq_ignore_ascii_case(role_name))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_role_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
