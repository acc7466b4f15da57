//! Categorical legend for hosts that color by factor.
//!
//! With uniform spacing each interval between consecutive ticks becomes a
//! factor, so labels name intervals. With proportional spacing labels
//! override the rendering of the ticks themselves.

use serde::Serialize;
use tracing::debug;

use super::{format_number, LegendSpec};
use crate::colormaps::{ColorModel, ModelArray, Palette};
use crate::error::{HuecraftError, Result};

/// Options handed to a categorical plotting host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySettings {
    /// Palette as `#rrggbb` strings
    pub cmap: Vec<String>,
    pub color_levels: Vec<f64>,
    pub clim: (f64, f64),
    /// Fixed tick positions for the colorbar
    pub ticker: Vec<f64>,
    /// Interval names for a categorical color mapper (uniform spacing only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_label_overrides: Option<Vec<(f64, String)>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLegend {
    palette: Vec<String>,
    ticks: Vec<f64>,
    uniform_spacing: bool,
    factors: Option<Vec<String>>,
    label_overrides: Option<Vec<(f64, String)>>,
}

impl CategoryLegend {
    pub fn new(palette: &Palette, spec: &LegendSpec) -> Result<Self> {
        let ticks = spec.bounds.resolve(palette.len())?.ticks;
        if ticks.is_empty() {
            return Err(HuecraftError::out_of_range("bounds produced no ticks"));
        }
        let hex = match palette.to_model(ColorModel::Hex) {
            ModelArray::Hex(codes) => codes,
            ModelArray::Channels(_) => Vec::new(),
        };

        let num_ticks = ticks.len();
        let num_labels = spec.labels.as_ref().map_or(0, Vec::len);
        let mut factors = None;
        let mut label_overrides = None;

        if spec.uniform_spacing {
            match &spec.labels {
                None => {
                    factors = Some(
                        ticks
                            .windows(2)
                            .map(|pair| format!("{} - {}", format_number(pair[0]), format_number(pair[1])))
                            .collect(),
                    );
                }
                Some(labels) => {
                    if num_labels + 1 != num_ticks {
                        return Err(HuecraftError::CountMismatch {
                            message: format!(
                                "Number of labels must be one less than the number of ticks; \
                                 received {num_labels} labels and {num_ticks} ticks."
                            ),
                            expected: num_ticks.saturating_sub(1),
                            received: num_labels,
                        });
                    }
                    factors = Some(labels.clone());
                }
            }
        } else if let Some(labels) = spec.labels.as_ref().filter(|labels| !labels.is_empty()) {
            if num_labels != num_ticks {
                return Err(HuecraftError::CountMismatch {
                    message: format!(
                        "Number of labels must be equal to the number of ticks; \
                         received {num_labels} labels and {num_ticks} ticks."
                    ),
                    expected: num_ticks,
                    received: num_labels,
                });
            }
            label_overrides = Some(ticks.iter().copied().zip(labels.iter().cloned()).collect());
        }

        debug!(
            palette = %palette.name(),
            ticks = num_ticks,
            labels = num_labels,
            uniform = spec.uniform_spacing,
            "Built category legend"
        );

        Ok(Self {
            palette: hex,
            ticks,
            uniform_spacing: spec.uniform_spacing,
            factors,
            label_overrides,
        })
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn factors(&self) -> Option<&[String]> {
        self.factors.as_deref()
    }

    pub fn label_overrides(&self) -> Option<&[(f64, String)]> {
        self.label_overrides.as_deref()
    }

    pub fn settings(&self) -> CategorySettings {
        CategorySettings {
            cmap: self.palette.clone(),
            color_levels: self.ticks.clone(),
            clim: (self.ticks[0], self.ticks[self.ticks.len() - 1]),
            ticker: self.ticks.clone(),
            factors: if self.uniform_spacing {
                self.factors.clone()
            } else {
                None
            },
            major_label_overrides: if self.uniform_spacing {
                None
            } else {
                self.label_overrides.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::Bounds;
    use pretty_assertions::assert_eq;

    fn palette() -> Palette {
        Palette::from_colors(
            &["red".into(), "green".into(), "blue".into()],
            ColorModel::Rgb,
            Some("rgb"),
        )
        .unwrap()
    }

    #[test]
    fn test_uniform_default_factors() {
        let spec = LegendSpec::new(Bounds::Ticks(vec![0.0, 4.0, 18.0]));
        let legend = CategoryLegend::new(&palette(), &spec).unwrap();
        assert_eq!(legend.factors().unwrap(), ["0 - 4", "4 - 18"]);
        assert_eq!(legend.palette(), ["#ff0000", "#008000", "#0000ff"]);
        let settings = legend.settings();
        assert_eq!(settings.clim, (0.0, 18.0));
        assert_eq!(settings.ticker, vec![0.0, 4.0, 18.0]);
        assert!(settings.major_label_overrides.is_none());
    }

    #[test]
    fn test_uniform_label_count() {
        let ok = LegendSpec::new(Bounds::Ticks(vec![0.0, 1.0, 2.0])).labels(["low", "high"]);
        assert_eq!(
            CategoryLegend::new(&palette(), &ok).unwrap().factors().unwrap(),
            ["low", "high"]
        );

        let bad = LegendSpec::new(Bounds::Ticks(vec![0.0, 1.0, 2.0])).labels(["a", "b", "c"]);
        let err = CategoryLegend::new(&palette(), &bad).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Count mismatch: Number of labels must be one less than the number of ticks; \
             received 3 labels and 3 ticks."
        );
    }

    #[test]
    fn test_proportional_label_overrides() {
        let spec = LegendSpec::new(Bounds::Ticks(vec![0.0, 5.0]))
            .uniform_spacing(false)
            .labels(["zero", "five"]);
        let legend = CategoryLegend::new(&palette(), &spec).unwrap();
        let overrides = legend.label_overrides().unwrap();
        assert_eq!(overrides, [(0.0, "zero".to_string()), (5.0, "five".to_string())]);
        assert!(legend.settings().factors.is_none());
    }

    #[test]
    fn test_proportional_label_count() {
        let spec = LegendSpec::new(Bounds::Ticks(vec![0.0, 5.0, 10.0]))
            .uniform_spacing(false)
            .labels(["a"]);
        let err = CategoryLegend::new(&palette(), &spec).unwrap_err();
        match err {
            HuecraftError::CountMismatch { expected, received, message } => {
                assert_eq!((expected, received), (3, 1));
                assert!(message.contains("must be equal to the number of ticks"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_proportional_without_labels() {
        let spec = LegendSpec::new(Bounds::range(0.0, 10.0, Some(5.0))).uniform_spacing(false);
        let legend = CategoryLegend::new(&palette(), &spec).unwrap();
        assert!(legend.label_overrides().is_none());
        assert!(legend.factors().is_none());
        assert_eq!(legend.ticks(), [0.0, 5.0, 10.0]);
    }
}
