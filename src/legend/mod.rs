//! Legend layout for discrete and continuous colorbars.
//!
//! A [`LegendSpec`] says how a palette should be laid along a numeric axis.
//! [`ColorbarLayout`] turns it into a normalization, tick positions and a
//! tick formatter for a colorbar host; [`CategoryLegend`] produces the
//! categorical variant with interval factors or per-tick label overrides.

pub mod category;
pub mod colorbar;
pub mod norm;

pub use category::{CategoryLegend, CategorySettings};
pub use colorbar::{ColorbarLayout, ColorbarSettings, PlotSettings, TickFormatter};
pub use norm::{BoundaryNorm, LinearNorm, Norm, Normalize};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HuecraftError, Result};

/// Most ticks generated for a range without a step
pub const MAX_RANGE_TICKS: usize = 11;

/// Where a legend's values come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bounds {
    /// Explicit tick values, sorted before use
    Ticks(Vec<f64>),
    /// `start..=stop`, evenly divided or walked by `step`
    Range {
        start: f64,
        stop: f64,
        #[serde(default)]
        step: Option<f64>,
    },
}

/// Ticks and value range derived from [`Bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBounds {
    pub ticks: Vec<f64>,
    pub vmin: f64,
    pub vmax: f64,
}

impl Bounds {
    pub fn range(start: f64, stop: f64, step: Option<f64>) -> Self {
        Bounds::Range { start, stop, step }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Bounds::Range { .. })
    }

    /// Compute tick values for a palette of `num_colors` samples
    pub fn resolve(&self, num_colors: usize) -> Result<ResolvedBounds> {
        match self {
            Bounds::Ticks(values) => {
                if values.is_empty() {
                    return Err(HuecraftError::out_of_range("bounds must hold at least one value"));
                }
                if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                    return Err(HuecraftError::out_of_range(format!(
                        "bounds must be finite; received {bad}"
                    )));
                }
                let mut ticks = values.clone();
                ticks.sort_by(f64::total_cmp);
                let (vmin, vmax) = (ticks[0], ticks[ticks.len() - 1]);
                Ok(ResolvedBounds { ticks, vmin, vmax })
            }
            Bounds::Range { start, stop, step } => {
                if !start.is_finite() || !stop.is_finite() {
                    return Err(HuecraftError::out_of_range(format!(
                        "range bounds must be finite; received {start} to {stop}"
                    )));
                }
                let ticks = match step {
                    None => linspace(*start, *stop, num_colors.saturating_sub(1).min(MAX_RANGE_TICKS)),
                    Some(step) => stepped(*start, *stop, *step)?,
                };
                Ok(ResolvedBounds {
                    ticks,
                    vmin: *start,
                    vmax: *stop,
                })
            }
        }
    }
}

/// `num` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + delta * i as f64 })
                .collect()
        }
    }
}

/// `start, start + step, ...` over the half-open range up to `stop + step`.
fn stepped(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if step == 0.0 || !step.is_finite() {
        return Err(HuecraftError::out_of_range(format!(
            "range step must be finite and non-zero; received {step}"
        )));
    }
    let count = ((stop + step - start) / step).ceil();
    if count <= 0.0 {
        return Ok(Vec::new());
    }
    Ok((0..count as usize).map(|i| start + step * i as f64).collect())
}

/// How a colorbar shows values beyond its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extend {
    Neither,
    #[default]
    Both,
    Min,
    Max,
}

impl Extend {
    pub fn extends_min(&self) -> bool {
        matches!(self, Extend::Both | Extend::Min)
    }

    pub fn extends_max(&self) -> bool {
        matches!(self, Extend::Both | Extend::Max)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Extend::Neither => "neither",
            Extend::Both => "both",
            Extend::Min => "min",
            Extend::Max => "max",
        }
    }
}

impl fmt::Display for Extend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extend {
    type Err = HuecraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neither" => Ok(Extend::Neither),
            "both" => Ok(Extend::Both),
            "min" => Ok(Extend::Min),
            "max" => Ok(Extend::Max),
            _ => Err(HuecraftError::InvalidParameter {
                param: "extend".to_string(),
                message: format!("Invalid extend mode: '{s}'; select from: neither, both, min, max."),
            }),
        }
    }
}

/// Visual spacing of colorbar ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Equal distance between ticks
    Uniform,
    /// Distance proportional to value
    Proportional,
}

impl Spacing {
    pub fn from_uniform(uniform: bool) -> Self {
        if uniform {
            Spacing::Uniform
        } else {
            Spacing::Proportional
        }
    }
}

/// Everything needed to lay a palette along a legend axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSpec {
    pub bounds: Bounds,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default = "default_uniform_spacing")]
    pub uniform_spacing: bool,
    #[serde(default)]
    pub center: Option<bool>,
    #[serde(default)]
    pub extend: Extend,
    #[serde(default)]
    pub clip: Option<bool>,
}

fn default_uniform_spacing() -> bool {
    true
}

impl LegendSpec {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            labels: None,
            uniform_spacing: default_uniform_spacing(),
            center: None,
            extend: Extend::default(),
            clip: None,
        }
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn uniform_spacing(mut self, uniform: bool) -> Self {
        self.uniform_spacing = uniform;
        self
    }

    pub fn center(mut self, center: bool) -> Self {
        self.center = Some(center);
        self
    }

    pub fn extend(mut self, extend: Extend) -> Self {
        self.extend = extend;
        self
    }

    pub fn clip(mut self, clip: bool) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Clip when set, otherwise only when nothing is extended
    pub fn effective_clip(&self) -> bool {
        self.clip.unwrap_or(self.extend == Extend::Neither)
    }
}

/// Render a tick value: whole numbers without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
