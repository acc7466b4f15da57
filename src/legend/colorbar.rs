//! Continuous and boundary-discrete colorbar layout.

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::norm::{BoundaryNorm, LinearNorm, Norm, Normalize};
use super::{format_number, LegendSpec, Spacing};
use crate::colormaps::{Palette, Rgba};
use crate::error::Result;

/// Maps a tick's ordinal position to its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickFormatter {
    labels: Vec<String>,
}

impl TickFormatter {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label at `position`; empty past the end of the list
    pub fn format(&self, position: usize) -> String {
        match self.labels.get(position) {
            Some(label) => label.clone(),
            None => {
                debug!(
                    position,
                    labels = self.labels.len(),
                    "Tick position has no label; rendering empty"
                );
                String::new()
            }
        }
    }
}

/// Palette and norm for the plotted artist.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlotSettings<'a> {
    pub palette: &'a Palette,
    pub norm: &'a Norm,
}

/// Everything a colorbar host needs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColorbarSettings<'a> {
    pub palette: &'a Palette,
    pub norm: &'a Norm,
    pub ticks: Option<&'a [f64]>,
    pub formatter: Option<&'a TickFormatter>,
    pub spacing: Spacing,
}

/// A palette laid along a numeric axis.
#[derive(Debug, Clone)]
pub struct ColorbarLayout {
    palette: Palette,
    norm: Norm,
    ticks: Option<Vec<f64>>,
    formatter: Option<TickFormatter>,
    spacing: Spacing,
}

impl ColorbarLayout {
    /// Choose a norm and ticks for `palette`.
    ///
    /// Explicit bounds default to uncentered bins. A range with `center`
    /// unset gets a linear norm and leaves tick placement to the host.
    /// Centered bins put each tick in the middle of its bin and label it
    /// with its original value unless labels were given.
    pub fn new(palette: &Palette, spec: &LegendSpec) -> Result<Self> {
        let num_colors = palette.len();
        let resolved = spec.bounds.resolve(num_colors)?;
        let is_range = spec.bounds.is_range();
        let center = match spec.center {
            None if !is_range => Some(false),
            other => other,
        };
        let clip = spec.effective_clip();
        let mut labels = spec.labels.clone();

        let (norm, ticks) = match center {
            None => {
                let norm = LinearNorm::new(resolved.vmin, resolved.vmax, clip)?;
                let ticks = if is_range { None } else { Some(resolved.ticks) };
                (Norm::Linear(norm), ticks)
            }
            Some(true) => {
                let original = resolved.ticks;
                let mut edges = Vec::with_capacity(original.len() + 1);
                if let Some(first) = original.first() {
                    edges.push(first + 0.5 - 1.0);
                }
                edges.extend(original.iter().map(|tick| tick + 0.5));
                let centers = edges
                    .windows(2)
                    .map(|pair| pair[0] + (pair[1] - pair[0]) / 2.0)
                    .collect();
                let norm = BoundaryNorm::new(edges, num_colors, clip, spec.extend)?;
                if labels.is_none() {
                    labels = Some(original.iter().map(|tick| format_number(*tick)).collect());
                }
                (Norm::Boundary(norm), Some(centers))
            }
            Some(false) => {
                let norm = BoundaryNorm::new(resolved.ticks.clone(), num_colors, clip, spec.extend)?;
                (Norm::Boundary(norm), Some(resolved.ticks))
            }
        };

        debug!(
            palette = %palette.name(),
            norm = norm.name(),
            ticks = ?ticks.as_ref().map(Vec::len),
            clip,
            extend = %spec.extend,
            "Built colorbar layout"
        );

        Ok(Self {
            palette: palette.clone(),
            norm,
            ticks,
            formatter: labels.map(TickFormatter::new),
            spacing: Spacing::from_uniform(spec.uniform_spacing),
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn norm(&self) -> &Norm {
        &self.norm
    }

    pub fn ticks(&self) -> Option<&[f64]> {
        self.ticks.as_deref()
    }

    pub fn formatter(&self) -> Option<&TickFormatter> {
        self.formatter.as_ref()
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn plot_settings(&self) -> PlotSettings<'_> {
        PlotSettings {
            palette: &self.palette,
            norm: &self.norm,
        }
    }

    pub fn colorbar_settings(&self) -> ColorbarSettings<'_> {
        ColorbarSettings {
            palette: &self.palette,
            norm: &self.norm,
            ticks: self.ticks(),
            formatter: self.formatter(),
            spacing: self.spacing,
        }
    }

    /// Color the plot would draw for `value`
    pub fn color_of(&self, value: f64) -> Rgba {
        self.palette
            .color(self.norm.color_index(value, self.palette.len()))
    }

    /// Rendered label for each tick, in order
    pub fn tick_labels(&self) -> Vec<String> {
        let Some(ticks) = &self.ticks else {
            return Vec::new();
        };
        ticks
            .iter()
            .enumerate()
            .map(|(position, tick)| match &self.formatter {
                Some(formatter) => formatter.format(position),
                None => format_number(*tick),
            })
            .collect()
    }

    /// JSON description of the layout without the palette samples
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "palette": self.palette.name(),
            "num_colors": self.palette.len(),
            "norm": self.norm,
            "vmin": self.norm.vmin(),
            "vmax": self.norm.vmax(),
            "ticks": self.ticks,
            "labels": self.ticks.as_ref().map(|_| self.tick_labels()),
            "spacing": self.spacing,
        })
    }
}
