//! # orgdeck Models
//!
//! Domain models and DTOs for orgdeck.
//!
//! # Modules
//!
//! - [`access`]: Access groups, category buckets and access matrix DTOs
//! - [`ids`]: Strongly-typed entity ids
//! - [`roles`]: Roles and permissions
//!
//! # Example
//!
//! ```ignore
//! use orgdeck_models::{AccessGroup, Permission, Role};
//!
//! let group: AccessGroup = "readonly".parse()?;
//! ```

pub mod access;
pub mod ids;
pub mod roles;

// Re-export commonly used types at crate root for convenience
pub use access::{
    AccessGroup, AccessSelection, ActionPermission, BulkUpdateAccessDto, CategoryAccess,
    CategoryBucket, CategoryBuckets, CrudAction, ParseAccessGroupError, PermissionCategory,
    PermissionChange, RoleAccessMatrix, RoleAccessUpdateResponse, UpdateAccessGroupDto,
    category_label,
};
pub use ids::{PermissionId, RoleId};
pub use roles::{Permission, Role};
