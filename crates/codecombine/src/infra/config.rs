//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::{DEFAULT_EXTENSIONS, EntryOrder};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
pub const WORKSPACE_CONFIG_FILE: &str = ".codecombine.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub combine: Combine,
}

/// The `[combine]` table. Unset keys fall through to earlier layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Combine {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    extensions: Option<Vec<String>>,
    #[serde(default)]
    order: Option<EntryOrder>,
}

impl Combine {
    fn default_output() -> &'static str {
        "combined_code.txt"
    }

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect()
    }

    pub fn output(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output().to_owned())
    }

    pub fn extensions(&self) -> Vec<String> {
        self.extensions
            .clone()
            .unwrap_or_else(Self::default_extensions)
    }

    pub fn order(&self) -> EntryOrder {
        self.order.unwrap_or_default()
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output: Option<String>,
    order: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output: env::var("CODECOMBINE_OUTPUT").ok(),
            order: env::var("CODECOMBINE_ORDER").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output: Option<&str>, order: Option<&str>) -> Self {
        Self {
            output: output.map(str::to_owned),
            order: order.map(str::to_owned),
        }
    }
}

impl Config {
    /// Load configuration for a run over `root`: defaults, global config,
    /// `<root>/.codecombine.toml`, then env overrides.
    pub fn load(root: &Path) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = Some(workspace_config_path(root));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.is_file()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.is_file()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            combine: merge_combine(self.combine, other.combine),
        }
    }
}

fn merge_combine(mut base: Combine, overlay: Combine) -> Combine {
    if let Some(value) = overlay.output {
        base.output = Some(value);
    }
    if let Some(value) = overlay.extensions {
        base.extensions = Some(value);
    }
    if let Some(value) = overlay.order {
        base.order = Some(value);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("codecombine/config.toml"))
}

fn workspace_config_path(root: &Path) -> PathBuf {
    root.join(WORKSPACE_CONFIG_FILE)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(output) = env.output.filter(|value| !value.trim().is_empty()) {
        config.combine.output = Some(output);
    }
    if let Some(order) = env.order {
        let order = order
            .parse::<EntryOrder>()
            .context("invalid CODECOMBINE_ORDER")?;
        config.combine.order = Some(order);
    }
    Ok(config)
}
