//! # orgdeck Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`access`]: Access matrix behaviour (read-write/delete flag, protected roles)
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address and dataset location
//!
//! # Example
//!
//! ```ignore
//! use orgdeck_config::{AccessConfig, CorsConfig, ServerConfig};
//!
//! let access_config = AccessConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use server::ServerConfig;
