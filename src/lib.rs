//! # orgdeck
//!
//! Role access matrix for a multi-tenant organisation dashboard.
//!
//! Administrators edit role permissions through four simplified access groups
//! per permission category (`full`, `readwrite`, `readonly`, `none`) instead
//! of ticking individual `category:action` permissions. This crate derives the
//! group a role currently has and turns a chosen group back into the concrete
//! permissions to store.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # orgdeck-cli commands (inspect and edit dataset files)
//! ├── modules/
//! │   ├── access/      # Access group engine and matrix endpoints
//! │   └── roles/       # Permission catalog and role listing endpoints
//! ├── store.rs          # In-memory catalog and role snapshots
//! ├── logging.rs        # Tracing setup and request logging
//! └── router.rs         # Main application router
//! ```
//!
//! ## Access groups
//!
//! | Group | Granted permissions |
//! |-------|---------------------|
//! | `full` | `manage` if the category has one, otherwise every action |
//! | `readwrite` | view, create, edit (plus delete when configured) |
//! | `readonly` | view |
//! | `none` | nothing |
//!
//! The `member` and `administrator` roles are protected: the engine leaves
//! them untouched and the API answers `403 Forbidden`.
//!
//! ## Environment Variables
//!
//! ```bash
//! ACCESS_READWRITE_INCLUDES_DELETE=false
//! ACCESS_IMMUTABLE_ROLES=auditor   # added to member, administrator
//! SEED_PATH=./dataset.json
//! ALLOWED_ORIGINS=http://localhost:5173
//! LOG_DIR=storage/logs
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface
//! - [`docs`]: OpenAPI documentation
//! - [`logging`]: Tracing initialization and request logging
//! - [`modules`]: Feature modules (access, roles)
//! - [`router`]: Main application router
//! - [`state`]: Shared application state
//! - [`store`]: In-memory role store
//! - [`validator`]: Request validation

pub mod cli;
pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod validator;

// Re-export workspace crates for convenience
pub use orgdeck_config;
pub use orgdeck_core;
pub use orgdeck_models;
