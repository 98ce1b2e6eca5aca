//! Configuration module
//!
//! Loaded from TOML (`~/.config/patient-registry/config.toml` by default).
//! Every section is optional and falls back to its defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shared::{DomainError, DomainResult};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
}

/// Paging policy for patient search
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when the caller does not send one
    pub default_page_size: u64,
    /// Upper bound for any requested page size
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `patient_registry=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: &Path) -> DomainResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Validation(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> DomainResult<Self> {
        let config: AppConfig = toml::from_str(raw)
            .map_err(|e| DomainError::Validation(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let p = &self.pagination;
        if p.max_page_size == 0 {
            return Err(DomainError::Validation(
                "pagination.max_page_size must be at least 1".into(),
            ));
        }
        if p.default_page_size == 0 || p.default_page_size > p.max_page_size {
            return Err(DomainError::Validation(format!(
                "pagination.default_page_size must be between 1 and {}",
                p.max_page_size
            )));
        }
        Ok(())
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("patient-registry")
        .join("config.toml")
}
