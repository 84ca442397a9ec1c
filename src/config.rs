use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "reportsplit.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing TOML: {}", path.display()))
    }

    /// `--config` if given, else `./reportsplit.toml` if present, else defaults.
    pub fn resolve(user: Option<&Path>) -> Result<Self> {
        if let Some(p) = user {
            return Self::load(p);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.exists() {
            Self::load(default)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Direct-to-path destination. Empty means stage under `staging_dir`.
    pub dir: String,
    /// Empty means `<system temp>/reportsplit`.
    pub staging_dir: String,
}

impl Output {
    pub fn destination(&self) -> Option<PathBuf> {
        non_empty(&self.dir).map(PathBuf::from)
    }

    pub fn staging_root(&self) -> PathBuf {
        non_empty(&self.staging_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("reportsplit"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
