//! Server-side configuration.
//!
//! Loaded from a TOML file. A bare context name resolves to
//! `/etc/hfp/<name>.toml`; a value containing `/` or `.` is used as a path
//! directly. Every field has a default, so running without a config file
//! is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub guard: GuardSection,

    #[serde(default)]
    pub rates: RatesSection,
}

/// Request guard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardSection {
    /// Maximum value-tree nesting depth before a request is rejected.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum request body size (bytes) buffered for scanning.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_max_depth() -> usize {
    64
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for GuardSection {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Rates module settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesSection {
    /// Hour of day (IST) from which rate publishing is blocked.
    /// Omit to disable the cutoff.
    #[serde(default = "default_cutoff_hour")]
    pub cutoff_hour_ist: Option<u32>,
}

fn default_cutoff_hour() -> Option<u32> {
    Some(16)
}

impl Default for RatesSection {
    fn default() -> Self {
        Self {
            cutoff_hour_ist: default_cutoff_hour(),
        }
    }
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/hfp/{}.toml", name_or_path))
        }
    }

    /// Load config from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Verify configuration is usable.
    pub fn verify(&self) -> anyhow::Result<()> {
        if self.guard.max_depth == 0 {
            anyhow::bail!("guard.max_depth must be at least 1");
        }
        if self.guard.max_body_bytes == 0 {
            anyhow::bail!("guard.max_body_bytes must be at least 1");
        }
        if let Some(hour) = self.rates.cutoff_hour_ist {
            if hour > 23 {
                anyhow::bail!("rates.cutoff_hour_ist must be between 0 and 23");
            }
        }
        Ok(())
    }
}
