//! Configuration management for syncpanel
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TICK_RATE_MS, MAX_INTERVAL_MS, MIN_LOG_ENTRIES,
};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How often the UI loop ticks, in milliseconds
    pub tick_rate_ms: u64,
    /// How often progress indicators poll their operation, in milliseconds
    pub poll_interval_ms: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format used when stamping the last sync time
    pub timestamp_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file in the cache directory
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// How many entries the in-app log view keeps
    pub max_entries: usize,
}

/// Simulated project model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay between two progress steps, in milliseconds
    pub step_ms: u64,
    /// Progress added per step, in (0, 1]
    pub progress_step: f32,
    /// Probability in [0, 1] that an operation fails
    pub failure_rate: f64,
    /// Tag assigned to an untagged project by its first successful fetch
    pub default_tag: String,
    /// JSON project asset; the built-in sample project is used when unset
    pub asset_path: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            max_entries: 500,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_ms: 150,
            progress_step: 0.05,
            failure_rate: 0.0,
            default_tag: "demo-project".to_string(),
            asset_path: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed log level filter
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .with_context(|| format!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file();

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("syncpanel.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        let xdg_config = Self::get_default_config_path().ok()?;
        xdg_config.exists().then_some(xdg_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tick_rate_ms", self.ui.tick_rate_ms),
            ("poll_interval_ms", self.ui.poll_interval_ms),
            ("step_ms", self.simulation.step_ms),
        ] {
            if value == 0 || value > MAX_INTERVAL_MS {
                anyhow::bail!("{} must be between 1 and {}, got {}", name, MAX_INTERVAL_MS, value);
            }
        }

        let step = self.simulation.progress_step;
        if !(step > 0.0 && step <= 1.0) {
            anyhow::bail!("progress_step must be in (0, 1], got {}", step);
        }

        let rate = self.simulation.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("failure_rate must be in [0, 1], got {}", rate);
        }

        self.logging.level_filter()?;
        if self.logging.max_entries < MIN_LOG_ENTRIES {
            anyhow::bail!(
                "max_entries must be at least {}, got {}",
                MIN_LOG_ENTRIES,
                self.logging.max_entries
            );
        }

        if !datetime::is_valid_format(&self.display.timestamp_format) {
            anyhow::bail!("Invalid timestamp_format '{}'", self.display.timestamp_format);
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# syncpanel Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("syncpanel"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
