//! Application settings loaded from a TOML file with environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

/// File name of the document store inside the data directory.
pub const STORE_FILE: &str = "documents.json";

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the document store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Upload ceiling in bytes; larger files are rejected before extraction.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Analysis client configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("doclens")
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            llm: LlmConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, or from the platform config
    /// directory, falling back to defaults when no file exists. Environment
    /// overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = explicit
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        let settings = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?
            }
            _ => Self::default(),
        };

        Ok(settings.with_env_overrides())
    }

    /// Location of the config file when none is given on the command line.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("doclens").join("config.toml"))
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars: `DOCLENS_DATA_DIR`, `DOCLENS_MAX_UPLOAD_MB`, and
    /// the `LLM_*` family handled by [`LlmConfig::with_env_overrides`].
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("DOCLENS_DATA_DIR") {
            self.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("DOCLENS_MAX_UPLOAD_MB") {
            if let Ok(mb) = val.parse::<u64>() {
                self.max_upload_bytes = mb * 1024 * 1024;
            }
        }
        self.llm = self.llm.with_env_overrides();
        self
    }

    /// Path of the document store file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
        assert!(settings.store_path().ends_with("documents.json"));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let settings: Settings = toml::from_str("max_upload_bytes = 1024").unwrap();
        assert_eq!(settings.max_upload_bytes, 1024);
        assert!(settings.data_dir.ends_with("doclens"));
    }
}
