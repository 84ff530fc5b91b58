use std::path::{Path, PathBuf};

use serde::Deserialize;
use snafu::ResultExt;

use crate::{CliError, ParseConfigSnafu, ReadConfigSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub warning_days: Option<u32>,
    #[serde(default)]
    pub profiles: Option<PathBuf>,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    /// An explicit path must exist, the default one may be missing
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).context(ReadConfigSnafu { path })?;
        Self::parse(&content).context(ParseConfigSnafu { path })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyexpiry").join("config.toml"))
    }

    pub fn default_profiles_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("keyexpiry").join("profiles.json"))
    }

    /// Command line first, then the config file, then the library default
    pub fn warning_days(&self, flag: Option<u32>) -> u32 {
        flag.or(self.warning_days)
            .unwrap_or(keyexpiry::expiration::DEFAULT_WARNING_DAYS)
    }

    pub fn profiles_path(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.profiles.clone())
            .or_else(Self::default_profiles_path)
    }
}
