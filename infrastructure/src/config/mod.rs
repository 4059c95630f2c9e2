//! Configuration file loading for mixalture
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables: `MIXALTURE_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./mixalture.toml` or `./.mixalture.toml`
//! 4. Global: `$XDG_CONFIG_HOME/mixalture/config.toml` (or `~/.config/...`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileBehaviorConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FilePrimaryConfig, FileProvidersConfig, FileReplConfig, FileSecondaryConfig,
    FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
