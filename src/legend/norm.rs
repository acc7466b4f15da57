//! Value normalization for colorbars.
//!
//! A norm maps a data value to a position in a palette's lookup table.

use serde::Serialize;

use super::Extend;
use crate::colormaps::ColorIndex;
use crate::error::{HuecraftError, Result};

/// Trait for value to lookup-table mappings
pub trait Normalize {
    /// Table position of `value` in a palette of `ncolors` samples
    fn color_index(&self, value: f64, ncolors: usize) -> ColorIndex;

    /// Get the name of this normalization
    fn name(&self) -> &str;
}

/// Linear mapping of `[vmin, vmax]` onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearNorm {
    pub vmin: f64,
    pub vmax: f64,
    pub clip: bool,
}

impl LinearNorm {
    pub fn new(vmin: f64, vmax: f64, clip: bool) -> Result<Self> {
        if vmin > vmax {
            return Err(HuecraftError::out_of_range(format!(
                "vmin must not exceed vmax; received {vmin} and {vmax}"
            )));
        }
        Ok(Self { vmin, vmax, clip })
    }

    /// Normalized position; values outside the range leave `[0, 1]` unless clipped
    pub fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        if self.vmin == self.vmax {
            return 0.0;
        }
        let value = if self.clip {
            value.clamp(self.vmin, self.vmax)
        } else {
            value
        };
        (value - self.vmin) / (self.vmax - self.vmin)
    }
}

impl Normalize for LinearNorm {
    fn color_index(&self, value: f64, ncolors: usize) -> ColorIndex {
        ColorIndex::from_normalized(self.normalize(value), ncolors)
    }

    fn name(&self) -> &str {
        "linear"
    }
}

/// Discrete bins between boundaries, spread evenly over the palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryNorm {
    pub boundaries: Vec<f64>,
    pub ncolors: usize,
    pub clip: bool,
    pub extend: Extend,
    #[serde(skip)]
    regions: usize,
    #[serde(skip)]
    offset: usize,
}

impl BoundaryNorm {
    /// Build bins from ascending `boundaries` for a palette of `ncolors`.
    ///
    /// Every extended side adds one bin; the bins may not outnumber the colors.
    pub fn new(boundaries: Vec<f64>, ncolors: usize, clip: bool, extend: Extend) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(HuecraftError::CountMismatch {
                message: format!(
                    "at least 2 boundaries are required; received {}",
                    boundaries.len()
                ),
                expected: 2,
                received: boundaries.len(),
            });
        }
        if boundaries.windows(2).any(|pair| !(pair[0] < pair[1])) {
            return Err(HuecraftError::out_of_range(format!(
                "boundaries must be strictly increasing; received {boundaries:?}"
            )));
        }

        let regions = boundaries.len() - 1
            + usize::from(extend.extends_min())
            + usize::from(extend.extends_max());
        if regions > ncolors {
            return Err(HuecraftError::CountMismatch {
                message: format!(
                    "There are {regions} color bins including extensions, but ncolors = {ncolors}; \
                     ncolors must equal or exceed the number of bins"
                ),
                expected: regions,
                received: ncolors,
            });
        }

        Ok(Self {
            boundaries,
            ncolors,
            clip,
            extend,
            regions,
            offset: usize::from(extend.extends_min()),
        })
    }

    pub fn vmin(&self) -> f64 {
        self.boundaries[0]
    }

    pub fn vmax(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Number of bins, extensions included
    pub fn regions(&self) -> usize {
        self.regions
    }

    /// Table position for `value`: under below the first boundary, over (or
    /// the last color when clipping) at or past the last
    pub fn map(&self, value: f64) -> ColorIndex {
        self.map_into(value, self.ncolors)
    }

    /// Like [`map`](Self::map), with the bins spread over a table of
    /// `ncolors` entries instead of the one the norm was built for
    pub fn map_into(&self, value: f64, ncolors: usize) -> ColorIndex {
        let ncolors = ncolors.max(1);
        if value.is_nan() {
            return ColorIndex::Bad;
        }
        let value = if self.clip {
            value.clamp(self.vmin(), self.vmax())
        } else {
            value
        };
        if value < self.vmin() {
            return ColorIndex::Under;
        }
        if value >= self.vmax() {
            return if self.clip {
                ColorIndex::Index(ncolors - 1)
            } else {
                ColorIndex::Over
            };
        }

        let bin = self.boundaries.iter().filter(|b| **b <= value).count() - 1 + self.offset;
        let index = if ncolors > self.regions {
            if self.regions == 1 {
                if bin == 0 {
                    (ncolors - 1) / 2
                } else {
                    bin
                }
            } else {
                ((ncolors - 1) as f64 / (self.regions - 1) as f64 * bin as f64) as usize
            }
        } else {
            bin
        };
        ColorIndex::Index(index.min(ncolors - 1))
    }
}

impl Normalize for BoundaryNorm {
    fn color_index(&self, value: f64, ncolors: usize) -> ColorIndex {
        self.map_into(value, ncolors)
    }

    fn name(&self) -> &str {
        "boundary"
    }
}

/// The normalization chosen for a colorbar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Norm {
    Linear(LinearNorm),
    Boundary(BoundaryNorm),
}

impl Norm {
    pub fn vmin(&self) -> f64 {
        match self {
            Norm::Linear(norm) => norm.vmin,
            Norm::Boundary(norm) => norm.vmin(),
        }
    }

    pub fn vmax(&self) -> f64 {
        match self {
            Norm::Linear(norm) => norm.vmax,
            Norm::Boundary(norm) => norm.vmax(),
        }
    }
}

impl Normalize for Norm {
    fn color_index(&self, value: f64, ncolors: usize) -> ColorIndex {
        match self {
            Norm::Linear(norm) => norm.color_index(value, ncolors),
            Norm::Boundary(norm) => norm.color_index(value, ncolors),
        }
    }

    fn name(&self) -> &str {
        match self {
            Norm::Linear(norm) => norm.name(),
            Norm::Boundary(norm) => norm.name(),
        }
    }
}
