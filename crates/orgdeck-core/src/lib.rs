//! # orgdeck Core
//!
//! Core types, errors, and utilities for orgdeck.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`permissions`]: Permission name parsing and well-known permission names
//!
//! # Example
//!
//! ```ignore
//! use orgdeck_core::errors::AppError;
//! use orgdeck_core::permissions::parse_permission_name;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Role not found"));
//! let parsed = parse_permission_name("user:create");
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use permissions::{PermissionName, parse_permission_name};
