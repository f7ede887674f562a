//! Project configuration
//!
//! Settings are read from a config file in the project root (default
//! `designsync.config.json`) and then overridden by command-line values:
//!
//! 1. **Config file** - JSON, TOML or YAML, detected by extension
//! 2. **Overrides** - flags and environment variables resolved by the CLI
//!
//! # Example
//!
//! ```ignore
//! use dsync_core::config::ProjectConfig;
//!
//! let config = ProjectConfig::load_default(root)?
//!     .with_overrides(ProjectConfig { project_id: Some("p1".into()), ..Default::default() });
//! ```

mod project;
mod store;

pub use project::{DEFAULT_CONFIG_FILE, ProjectConfig};
pub use store::{ConfigFormat, load_config};
