//! # Configuration
//!
//! Settings are resolved from four layers, highest precedence first:
//!
//! 1. Command-line flags (`--snapshot`, `--as`)
//! 2. Environment (`TALENT_SNAPSHOT`, `TALENT_USER`, `TALENT_LOG_FORMAT`)
//! 3. The TOML config file (`talent.toml`, or `--config <path>`)
//! 4. Built-in defaults
//!
//! ```toml
//! snapshot = "data/snapshot.json"
//! acting_user = "hr1"
//! log_format = "json"
//! top_performers = 10
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use talent_core::TalentError;
use talent_core::primitives::DEFAULT_TOP_PERFORMERS;

/// Config file read when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "talent.toml";

/// Snapshot read when no layer names one.
pub const DEFAULT_SNAPSHOT_FILE: &str = "talent.json";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// LOG FORMAT
// =============================================================================

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = TalentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(TalentError::InvalidField {
                field: "log format",
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// LAYERS
// =============================================================================

/// Contents of `talent.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub snapshot: Option<PathBuf>,
    pub acting_user: Option<String>,
    pub log_format: Option<String>,
    pub top_performers: Option<usize>,
    /// Path the values were read from. Not a config key.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl FileConfig {
    /// Parse a config file body.
    pub fn parse(contents: &str) -> Result<Self, TalentError> {
        toml::from_str(contents)
            .map_err(|e| TalentError::DeserializationError(format!("Invalid config: {}", e)))
    }

    /// Read a config file.
    ///
    /// An explicitly requested file must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, TalentError> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(TalentError::IoError(format!(
                    "Config file '{}' not found",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| TalentError::IoError(format!("Cannot read file metadata: {}", e)))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(TalentError::IoError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| TalentError::IoError(format!("Cannot read config: {}", e)))?;
        let mut file = Self::parse(&contents)?;
        file.source = Some(path.to_path_buf());
        Ok(file)
    }
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub snapshot: Option<PathBuf>,
    pub acting_user: Option<String>,
    pub log_format: Option<String>,
}

impl EnvConfig {
    /// Read `TALENT_SNAPSHOT`, `TALENT_USER` and `TALENT_LOG_FORMAT`.
    pub fn from_process() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            snapshot: non_empty("TALENT_SNAPSHOT").map(PathBuf::from),
            acting_user: non_empty("TALENT_USER"),
            log_format: non_empty("TALENT_LOG_FORMAT"),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub snapshot: Option<PathBuf>,
    pub acting_user: Option<String>,
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub snapshot: PathBuf,
    pub acting_user: Option<String>,
    pub log_format: LogFormat,
    pub top_performers: usize,
    /// Config file that contributed to these settings, if any.
    pub config_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            acting_user: None,
            log_format: LogFormat::Text,
            top_performers: DEFAULT_TOP_PERFORMERS,
            config_file: None,
        }
    }
}

impl Settings {
    /// Merge the layers, highest precedence first.
    pub fn resolve(
        cli: CliOverrides,
        env: EnvConfig,
        file: FileConfig,
    ) -> Result<Self, TalentError> {
        let defaults = Self::default();

        let log_format = match env.log_format.or(file.log_format) {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            snapshot: cli
                .snapshot
                .or(env.snapshot)
                .or(file.snapshot)
                .unwrap_or(defaults.snapshot),
            acting_user: cli.acting_user.or(env.acting_user).or(file.acting_user),
            log_format,
            top_performers: file.top_performers.unwrap_or(defaults.top_performers),
            config_file: file.source,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
