//! Configuration for ngender
//!
//! Supports loading config from:
//! - Environment variables (`NGENDER_CHARFREQ`, `NGENDER_TIPS`)
//! - `ngender.toml` in the working directory, or an explicit `--config` file
//! - ~/.config/ngender/config.toml
//!
//! Anything left unset falls back to the data bundled with the crate.

use crate::error::NGenderResult;
use crate::model::{
    BasePriors, CaptionBank, Classifier, FrequencyTable, BUNDLED_CHARFREQ, BUNDLED_TIPS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const PROJECT_CONFIG_FILE: &str = "ngender.toml";
pub const ENV_CHARFREQ: &str = "NGENDER_CHARFREQ";
pub const ENV_TIPS: &str = "NGENDER_TIPS";

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct NGenderConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub priors: PriorsConfig,

    #[serde(default)]
    pub request: RequestConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    /// Character frequency table (JSON)
    pub charfreq: Option<PathBuf>,

    /// Caption bank (JSON)
    pub tips: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriorsConfig {
    pub male: Option<f64>,
    pub female: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct RequestConfig {
    /// Accept names of any length by default
    pub nolimit: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format: "text" or "json"
    pub format: Option<String>,
}

impl NGenderConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. `explicit` file if given, else `ngender.toml` in `dir`
    /// 3. User config (~/.config/ngender/config.toml)
    pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = NGenderConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            match Self::from_file(&path) {
                Ok(user) => {
                    debug!("Loaded user config from {}", path.display());
                    config.merge(user);
                }
                Err(e) => warn!("Failed to load {}: {:#}", path.display(), e),
            }
        }

        match explicit {
            Some(path) => {
                let project = Self::from_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?;
                config.merge(project);
            }
            None => {
                let path = dir.join(PROJECT_CONFIG_FILE);
                if path.exists() {
                    match Self::from_file(&path) {
                        Ok(project) => {
                            debug!("Loaded project config from {}", path.display());
                            config.merge(project);
                        }
                        Err(e) => warn!("Failed to load {}: {:#}", path.display(), e),
                    }
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML file; relative data paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: NGenderConfig = toml::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ngender").join("config.toml"))
    }

    fn resolve_paths(&mut self, base: &Path) {
        for slot in [&mut self.data.charfreq, &mut self.data.tips] {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: NGenderConfig) {
        if other.data.charfreq.is_some() {
            self.data.charfreq = other.data.charfreq;
        }
        if other.data.tips.is_some() {
            self.data.tips = other.data.tips;
        }
        if other.priors.male.is_some() {
            self.priors.male = other.priors.male;
        }
        if other.priors.female.is_some() {
            self.priors.female = other.priors.female;
        }
        if other.request.nolimit.is_some() {
            self.request.nolimit = other.request.nolimit;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_CHARFREQ).filter(|v| !v.is_empty()) {
            self.data.charfreq = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_TIPS).filter(|v| !v.is_empty()) {
            self.data.tips = Some(PathBuf::from(path));
        }
    }

    pub fn nolimit(&self) -> bool {
        self.request.nolimit.unwrap_or(false)
    }

    pub fn output_format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("text")
    }

    /// Priors from config, defaulting each side independently
    pub fn base_priors(&self) -> NGenderResult<BasePriors> {
        let defaults = BasePriors::default();
        BasePriors::new(
            self.priors.male.unwrap_or(defaults.male),
            self.priors.female.unwrap_or(defaults.female),
        )
    }

    pub fn frequency_table(&self) -> NGenderResult<FrequencyTable> {
        match &self.data.charfreq {
            Some(path) => FrequencyTable::load(path),
            None => FrequencyTable::from_json_str(BUNDLED_CHARFREQ),
        }
    }

    pub fn caption_bank(&self) -> NGenderResult<CaptionBank> {
        match &self.data.tips {
            Some(path) => CaptionBank::load(path),
            None => CaptionBank::from_json_str(BUNDLED_TIPS),
        }
    }

    /// Load and validate every reference table
    pub fn build_classifier(&self) -> NGenderResult<Classifier> {
        Ok(Classifier::new(
            self.frequency_table()?,
            self.base_priors()?,
            self.caption_bank()?,
        ))
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::write_example(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config to `path` unless a file already exists
    pub fn write_example(path: &Path) -> Result<bool> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, EXAMPLE_CONFIG)?;
        Ok(true)
    }
}

const EXAMPLE_CONFIG: &str = r#"# ngender configuration

[data]
# Character frequency table: {"字": {"male": 123, "female": 45}, ...}
# charfreq = "charfreq.json"

# Caption bank with male_/female_ sure, uncertain and reverse buckets
# tips = "tips.json"

[priors]
# Overall prior mass for each gender
# male = 0.581915415729593
# female = 0.418084584270407

[request]
# Accept names of any length (default: 2-4 characters)
# nolimit = false

[output]
# Default output format: "text" or "json"
# format = "text"
"#;
