use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_core::{DEFAULT_HISTORY_CAPACITY, Result, TallyError};
use tracing::{info, warn};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: default_history_capacity() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default)]
    pub show_timestamps: bool,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was absent and the built-in defaults are in use
    Defaults { missing: PathBuf },
}

impl ConfigSource {
    /// Report the source. Call once a subscriber is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!(path = %path.display(), "configuration loaded"),
            ConfigSource::Defaults { missing } => warn!(
                "Configuration file '{}' not found. Using default configuration.",
                missing.display()
            ),
        }
    }
}

impl TallyConfig {
    /// Load from `TALLY_CONFIG_PATH`, or `tally.toml` in the working directory.
    pub fn load() -> Result<(Self, ConfigSource)> {
        let config_path =
            std::env::var("TALLY_CONFIG_PATH").unwrap_or_else(|_| "tally.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource)> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                Ok((Self::from_toml_str(&contents)?, ConfigSource::File(path.to_path_buf())))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults { missing: path.to_path_buf() }))
            }
            Err(err) => Err(TallyError::configuration(format!(
                "failed to read '{}': {err}",
                path.display()
            ))),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|err| TallyError::configuration(format!("invalid configuration: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_profile(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(capacity) = lookup("TALLY_HISTORY_CAPACITY") {
            self.history.capacity = capacity.parse().map_err(|_| {
                TallyError::configuration(format!(
                    "TALLY_HISTORY_CAPACITY must be a positive integer, got '{capacity}'"
                ))
            })?;
        }
        if let Some(json) = lookup("TALLY_LOG_JSON") {
            if let Ok(json) = json.parse::<bool>() {
                self.logging.json = json;
            }
        }
        if let Some(show) = lookup("TALLY_SHOW_TIMESTAMPS") {
            if let Ok(show) = show.parse::<bool>() {
                self.display.show_timestamps = show;
            }
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history.capacity == 0 {
            return Err(TallyError::configuration("history.capacity must be at least 1"));
        }
        Ok(())
    }
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_log_filter() -> String {
    "tally=info".to_string()
}
