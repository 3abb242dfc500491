//! Configuration, validation and the merge-command runner for adlist.

pub mod cli;
pub mod config;
pub mod loader;
pub mod runner;
pub mod validate;

pub use cli::MergeArgs;
pub use config::AppConfig;
pub use loader::{load_config, ConfigError};
pub use runner::{run_merge, MergeSummary};
pub use validate::validate_config;
