//! Persistent CLI settings.
//!
//! Settings live in a TOML file, by default `<config dir>/renda/renda.toml`:
//!
//! ```toml
//! [data]
//! dir = "/var/lib/renda"
//! calendar = "ANBIMA"
//!
//! [engine]
//! bump = 0.0001
//! default_ipca_lag_months = 2
//!
//! [engine.solver]
//! tolerance = 1e-10
//!
//! [output]
//! format = "table"
//! precision = 6
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use renda_bonds::pricing::EngineSettings;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

const CONFIG_DIR: &str = "renda";
const CONFIG_FILE: &str = "renda.toml";

/// Index data location and calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding `cdi.csv`, `selic.csv` and `ipca.csv`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Business day calendar name.
    pub calendar: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: None,
            calendar: "ANBIMA".to_string(),
        }
    }
}

/// Output defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
    /// Decimal places in table output.
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 6,
        }
    }
}

/// All CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Index data.
    pub data: DataSettings,
    /// Valuation engine knobs.
    pub engine: EngineSettings,
    /// Output defaults.
    pub output: OutputSettings,
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Resolves the settings path: `explicit` if given, else the default.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(Self::default_path, Path::to_path_buf)
    }

    /// Loads settings; a missing file yields defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = Self::resolve_path(explicit);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        let settings: Settings = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CliError::Config(format!("{}: {e}", parent.display())))?;
        }
        fs::write(path, self.to_toml()?)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}
