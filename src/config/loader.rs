// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use validator::Validate;

use super::core::AppConfig;

pub struct ConfigLoader {
    config_path: PathBuf,
    format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref().to_path_buf();
        let format = Self::detect_format(&path)?;

        Ok(Self {
            config_path: path,
            format,
        })
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config file format"))?;

        match extension {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}",
                extension
            )),
        }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {:?}", self.config_path))?;

        let config: AppConfig = match self.format {
            ConfigFormat::Yaml => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {:?}", self.config_path))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {:?}", self.config_path))?,
            ConfigFormat::Json => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {:?}", self.config_path))?,
        };

        config
            .validate()
            .with_context(|| format!("Config validation failed for {:?}", self.config_path))?;

        Ok(config)
    }
}

/// Load a config file, or fall back to built-in defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => ConfigLoader::new(p)?.load(),
        None => Ok(AppConfig::default()),
    }
}
