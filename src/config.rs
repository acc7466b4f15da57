//! Configuration management for huecraft.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::colormaps::{ColorModel, PaletteRegistry};
use crate::error::{HuecraftError, Result};
use crate::recipe::Recipe;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Command-line arguments for huecraft
#[derive(Parser, Debug)]
#[command(name = "huecraft")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "HUECRAFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HUECRAFT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Color model for printed palettes (rgba, rgb, hsv, hex)
    #[arg(short = 'm', long = "model", env = "HUECRAFT_MODEL", global = true)]
    pub color_model: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do once configuration is loaded
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print a palette's samples
    Show {
        /// Palette descriptor, e.g. viridis_n10_r
        source: String,

        /// Resample to this many colors
        #[arg(short = 'n', long)]
        num_colors: Option<i64>,

        /// Reverse the palette
        #[arg(short, long)]
        reverse: bool,
    },

    /// Print the colorbar layout for a palette
    Legend {
        /// Palette descriptor
        source: String,

        /// Explicit tick values, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "range")]
        ticks: Option<Vec<f64>>,

        /// START STOP [STEP]
        #[arg(long, num_args = 2..=3, allow_hyphen_values = true)]
        range: Option<Vec<f64>>,

        /// Tick or interval labels, comma separated
        #[arg(long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// Center bins on ticks
        #[arg(long)]
        center: Option<bool>,

        /// Extend mode (neither, both, min, max)
        #[arg(long, default_value = "both")]
        extend: String,

        /// Clip out-of-range values
        #[arg(long)]
        clip: Option<bool>,

        /// Space ticks by value instead of evenly
        #[arg(long)]
        proportional: bool,

        /// Produce the categorical legend instead of a colorbar
        #[arg(long)]
        category: bool,
    },

    /// List registered palette names
    List,

    /// Cook a palette from a JSON recipe file
    Cook {
        /// Path to the recipe
        recipe: PathBuf,
    },
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Color model used when printing palettes
    #[serde(default = "default_color_model")]
    pub color_model: ColorModel,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra palettes registered at start-up, keyed by name
    #[serde(default)]
    pub palettes: BTreeMap<String, Recipe>,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        Self::from_args(Args::parse())
    }

    /// Layer parsed arguments over the config file and defaults
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments and environment
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }
        if let Some(model) = &args.color_model {
            config.output.color_model = model.parse()?;
        }
        if args.pretty {
            config.output.pretty = true;
        }

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.log_level = other.log_level;
        self.output = other.output;
        self.palettes.extend(other.palettes);
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(HuecraftError::Config {
                message: format!(
                    "Invalid log level: {}. Must be one of: {}",
                    self.log_level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if let Some(name) = self.palettes.keys().find(|name| name.trim().is_empty()) {
            return Err(HuecraftError::Config {
                message: format!("Palette names cannot be blank; received {name:?}"),
            });
        }

        Ok(())
    }

    /// Cook every configured palette and register it under its key
    pub fn register_palettes(&self, registry: &PaletteRegistry) -> Result<Vec<String>> {
        self.palettes
            .iter()
            .map(|(name, recipe)| {
                let recipe = Recipe {
                    name: Some(name.clone()),
                    ..recipe.clone()
                };
                recipe.cook(registry).map(|palette| palette.name().to_string())
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputConfig::default(),
            palettes: BTreeMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_model: default_color_model(),
            pretty: false,
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_color_model() -> ColorModel {
    ColorModel::Hex
}
