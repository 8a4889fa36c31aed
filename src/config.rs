use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::build::{BuildParams, Foundation, Material};
use crate::strategies::{BuildStrategy, CentralStrategy, RandomStrategy, UniformStrategy};

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_show_build_details() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub default_strategy: StrategyConfig,
    #[serde(default = "default_show_build_details")]
    pub show_build_details: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_strategy: StrategyConfig::default(),
            show_build_details: default_show_build_details(),
        }
    }
}

/// Strategy active when the menu starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StrategyConfig {
    Uniform {
        floors: u32,
        foundation: Foundation,
        material: Material,
    },
    #[default]
    Random,
    Central,
    None,
}

impl StrategyConfig {
    pub fn build(&self) -> Option<Box<dyn BuildStrategy>> {
        match *self {
            StrategyConfig::Uniform {
                floors,
                foundation,
                material,
            } => Some(Box::new(UniformStrategy::new(BuildParams::new(
                floors, foundation, material,
            )))),
            StrategyConfig::Random => Some(Box::new(RandomStrategy::new())),
            StrategyConfig::Central => Some(Box::new(CentralStrategy::new())),
            StrategyConfig::None => None,
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig =
            serde_yaml::from_str(text).context("Failed to parse planner config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let StrategyConfig::Uniform { floors: 0, .. } = self.default_strategy {
            bail!("uniform strategy floors must be a positive integer");
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            bail!("unknown log level '{}'", self.log_level);
        }
        Ok(())
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<PlannerConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        PlannerConfig::from_yaml_str(&data)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}
