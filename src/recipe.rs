//! JSON palette recipes.
//!
//! A recipe describes a palette declaratively so it can live in a config file
//! or be passed to the `cook` subcommand:
//!
//! ```json
//! {
//!   "source": ["midnightblue", "#ffcc00"],
//!   "num_colors": 12,
//!   "reverse": true,
//!   "under": "black",
//!   "tweak": { "saturation": 0.8 },
//!   "append": ["magma_n4"],
//!   "name": "dusk"
//! }
//! ```
//!
//! `source` may be a descriptor string, a list of colors, or an object with a
//! `samples` table of RGBA rows. Anything else is a type mismatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::colormaps::{ColorInput, ColorModel, HsvAdjust, Palette, PaletteRegistry, Rgba};
use crate::error::{HuecraftError, Result};
use crate::factory::{cook, CookOptions, PaletteSource};

/// A declarative palette definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    pub source: Value,
    #[serde(default)]
    pub color_model: Option<ColorModel>,
    #[serde(default)]
    pub num_colors: Option<i64>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bad: Option<ColorInput>,
    #[serde(default)]
    pub under: Option<ColorInput>,
    #[serde(default)]
    pub over: Option<ColorInput>,
    #[serde(default)]
    pub tweak: Option<HsvAdjust>,
    /// Further sources concatenated after the cooked palette
    #[serde(default)]
    pub append: Vec<Value>,
}

impl Recipe {
    /// A recipe that only names its source
    pub fn from_source(source: impl Into<Value>) -> Self {
        Self {
            source: source.into(),
            color_model: None,
            num_colors: None,
            reverse: false,
            name: None,
            bad: None,
            under: None,
            over: None,
            tweak: None,
            append: Vec::new(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Cook the recipe: factory steps first, then tweak, append, and finally
    /// registration when the recipe is named
    pub fn cook(&self, registry: &PaletteRegistry) -> Result<Palette> {
        let options = CookOptions {
            num_colors: self.num_colors,
            reverse: self.reverse,
            name: None,
            bad: self.bad.clone(),
            under: self.under.clone(),
            over: self.over.clone(),
            color_model: self.color_model,
        };
        let mut palette = cook(source_from_value(&self.source)?, &options, registry)?;

        if let Some(adjust) = &self.tweak {
            palette = palette.tweak(adjust, None)?;
        }

        for operand in &self.append {
            let source = source_from_value(operand).map_err(|err| match err {
                HuecraftError::TypeMismatch { received, .. } => HuecraftError::TypeMismatch {
                    expected: "a palette source to append".to_string(),
                    received,
                },
                other => other,
            })?;
            let options = CookOptions {
                color_model: self.color_model,
                ..CookOptions::default()
            };
            let other = cook(source, &options, registry)?;
            palette = palette.concatenate(&other);
        }

        if let Some(name) = &self.name {
            palette = palette.register(registry, Some(name))?;
        }

        debug!(palette = %palette.name(), samples = palette.len(), "Cooked recipe");
        Ok(palette)
    }
}

impl FromStr for Recipe {
    type Err = HuecraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Interpret a JSON value as a palette source
pub fn source_from_value(value: &Value) -> Result<PaletteSource> {
    match value {
        Value::String(name) => Ok(PaletteSource::Name(name.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                serde_json::from_value::<ColorInput>(item.clone()).map_err(|_| {
                    HuecraftError::TypeMismatch {
                        expected: "a color name or a 3 or 4 channel tuple".to_string(),
                        received: describe(item),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(PaletteSource::Colors),
        Value::Object(fields) if fields.contains_key("samples") => {
            let table = &fields["samples"];
            let samples: Vec<Rgba> =
                serde_json::from_value(table.clone()).map_err(|_| HuecraftError::TypeMismatch {
                    expected: "a table of RGBA rows".to_string(),
                    received: describe(table),
                })?;
            Ok(PaletteSource::Samples(samples))
        }
        other => Err(HuecraftError::TypeMismatch {
            expected: "a palette name, a list of colors or a sample table".to_string(),
            received: describe(other),
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
