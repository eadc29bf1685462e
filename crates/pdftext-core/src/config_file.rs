use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub backend: Option<BackendConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Fraction of page height at the top whose text is skipped.
    pub header_exclusion_ratio: Option<f32>,
    /// Fraction of page height at the bottom whose text is skipped.
    pub footer_exclusion_ratio: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"pdftext_core=debug"`.
    pub filter: Option<String>,
}

impl ConfigFile {
    pub fn header_exclusion_ratio(&self) -> Option<f32> {
        self.backend.as_ref().and_then(|b| b.header_exclusion_ratio)
    }

    pub fn footer_exclusion_ratio(&self) -> Option<f32> {
        self.backend.as_ref().and_then(|b| b.footer_exclusion_ratio)
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.filter.as_deref())
    }
}

/// Platform config directory path: `<config_dir>/pdftext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdftext").join("config.toml"))
}

/// A config assembled from the default locations, plus the files that
/// were present but could not be parsed.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: ConfigFile,
    pub skipped: Vec<ConfigError>,
}

/// Load config by cascading CWD `.pdftext.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> LoadedConfig {
    let platform = config_path();
    load_layers(platform.as_deref(), Path::new(".pdftext.toml"))
}

/// Cascade `overlay` over `base`. Missing files are skipped silently;
/// unparsable ones are reported in [`LoadedConfig::skipped`].
pub fn load_layers(base: Option<&Path>, overlay: &Path) -> LoadedConfig {
    let mut skipped = Vec::new();
    let mut load = |path: &Path| match read_config(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Read { .. }) => None,
        Err(e) => {
            skipped.push(e);
            None
        }
    };

    let platform = base.and_then(&mut load);
    let cwd = load(overlay);

    let config = match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    };
    LoadedConfig { config, skipped }
}

/// Load a config from a specific path. A missing or malformed file is an
/// error; [`load_layers`] decides which of those to tolerate.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        backend: Some(BackendConfig {
            header_exclusion_ratio: overlay
                .header_exclusion_ratio()
                .or_else(|| base.header_exclusion_ratio()),
            footer_exclusion_ratio: overlay
                .footer_exclusion_ratio()
                .or_else(|| base.footer_exclusion_ratio()),
        }),
        logging: Some(LoggingConfig {
            filter: overlay
                .log_filter()
                .or_else(|| base.log_filter())
                .map(str::to_string),
        }),
    }
}
