//! Output configuration from TOML (`[output]` section)

use mixalture_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Preferred output format when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// A format given on the command line wins over the file setting.
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }
}
