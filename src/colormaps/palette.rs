//! The palette entity.
//!
//! A [`Palette`] is an ordered, non-empty run of RGBA samples with a name and
//! optional extreme colors. Every transform returns a new palette; nothing
//! mutates in place and no two palettes share a sample buffer.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::color::{
    check_unit_range, clamp_unit, hsv_to_rgb, rgb_to_hsv, to_hex, ColorInput, ColorModel, Rgba,
};
use super::registry::PaletteRegistry;
use crate::descriptor::{encode_reverse, encode_subset, Descriptor, IndexSpec};
use crate::error::{HuecraftError, Result};

/// Name given to palettes built from a bare color list
pub const DEFAULT_NAME: &str = "custom_palette";

/// Fully transparent black, the default color for bad values
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];

/// Hue shift bound (exclusive), in the 8-bit hue scale
pub const HUE_LIMIT: f64 = 255.0;

/// Saturation scale bound (inclusive, symmetric)
pub const SATURATION_LIMIT: f64 = 10.0;

/// Brightness scale upper bound (inclusive); the lower bound is 0
pub const VALUE_LIMIT: f64 = 3.0;

/// Colors for values the palette's range cannot place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    /// Undefined (NaN) values
    pub bad: Option<Rgba>,
    /// Values below the mapped range
    pub under: Option<Rgba>,
    /// Values above the mapped range
    pub over: Option<Rgba>,
}

impl Extremes {
    pub fn is_unset(&self) -> bool {
        self.bad.is_none() && self.under.is_none() && self.over.is_none()
    }

    /// Overlay the colors set in `other` on top of these
    pub fn merged(self, other: Extremes) -> Extremes {
        Extremes {
            bad: other.bad.or(self.bad),
            under: other.under.or(self.under),
            over: other.over.or(self.over),
        }
    }
}

/// Adjustments applied by [`Palette::tweak`]; unset channels are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HsvAdjust {
    /// Additive hue shift on the 8-bit scale, within (-255, 255)
    #[serde(default)]
    pub hue: Option<f64>,
    /// Saturation multiplier within [-10, 10]
    #[serde(default)]
    pub saturation: Option<f64>,
    /// Brightness multiplier within [0, 3]
    #[serde(default)]
    pub value: Option<f64>,
}

impl HsvAdjust {
    pub fn hue(hue: f64) -> Self {
        Self {
            hue: Some(hue),
            ..Self::default()
        }
    }

    pub fn saturation(saturation: f64) -> Self {
        Self {
            saturation: Some(saturation),
            ..Self::default()
        }
    }

    pub fn value(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Check every set parameter against its bound
    pub fn validate(&self) -> Result<()> {
        if let Some(hue) = self.hue {
            if !(hue.abs() < HUE_LIMIT) {
                return Err(HuecraftError::out_of_range(format!(
                    "Hue must be between -{HUE_LIMIT} and {HUE_LIMIT} (non-inclusive); received {hue}."
                )));
            }
        }
        if let Some(saturation) = self.saturation {
            if !(saturation.abs() <= SATURATION_LIMIT) {
                return Err(HuecraftError::out_of_range(format!(
                    "Saturation must be between -{SATURATION_LIMIT} and {SATURATION_LIMIT}; received {saturation}."
                )));
            }
        }
        if let Some(value) = self.value {
            if !(0.0..=VALUE_LIMIT).contains(&value) {
                return Err(HuecraftError::out_of_range(format!(
                    "Value must be between 0 and {VALUE_LIMIT}; received {value}."
                )));
            }
        }
        Ok(())
    }

    fn apply(&self, sample: &Rgba) -> Rgba {
        let [mut h, mut s, mut v] = rgb_to_hsv([sample[0], sample[1], sample[2]]);
        if let Some(hue) = self.hue {
            h = (h + hue / HUE_LIMIT).rem_euclid(1.0);
        }
        if let Some(saturation) = self.saturation {
            s *= saturation;
        }
        if let Some(value) = self.value {
            v *= value;
        }
        let [r, g, b] = hsv_to_rgb([h.clamp(0.0, 1.0), s.clamp(0.0, 1.0), v.clamp(0.0, 1.0)]);
        clamp_unit([r, g, b, sample[3]])
    }
}

/// A palette projected to one color model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelArray {
    /// One row per sample, 4 (RGBA) or 3 (RGB, HSV) columns
    Channels(Array2<f64>),
    /// One `#rrggbb` string per sample
    Hex(Vec<String>),
}

impl ModelArray {
    pub fn len(&self) -> usize {
        match self {
            ModelArray::Channels(array) => array.nrows(),
            ModelArray::Hex(codes) => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain JSON rendering: nested number arrays or a list of strings
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ModelArray::Channels(array) => serde_json::Value::from(
                array
                    .rows()
                    .into_iter()
                    .map(|row| row.to_vec())
                    .collect::<Vec<Vec<f64>>>(),
            ),
            ModelArray::Hex(codes) => serde_json::Value::from(codes.clone()),
        }
    }
}

/// A position in a palette's lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorIndex {
    /// Undefined input
    Bad,
    /// Below the mapped range
    Under,
    /// Above the mapped range
    Over,
    Index(usize),
}

impl ColorIndex {
    /// Bin a normalized value into a table of `len` entries
    pub fn from_normalized(t: f64, len: usize) -> Self {
        if t.is_nan() {
            ColorIndex::Bad
        } else if t < 0.0 {
            ColorIndex::Under
        } else if t > 1.0 {
            ColorIndex::Over
        } else {
            ColorIndex::Index(((t * len as f64) as usize).min(len.saturating_sub(1)))
        }
    }
}

/// Linearly interpolate the samples at `t` in `[0, 1]`; NaN is transparent.
pub fn interpolate(samples: &[Rgba], t: f64) -> Rgba {
    if t.is_nan() {
        return TRANSPARENT;
    }
    match samples {
        [] => TRANSPARENT,
        [only] => *only,
        _ => {
            let position = t.clamp(0.0, 1.0) * (samples.len() - 1) as f64;
            let index = position.floor() as usize;
            if index >= samples.len() - 1 {
                return samples[samples.len() - 1];
            }
            let frac = position - index as f64;
            let (c1, c2) = (samples[index], samples[index + 1]);
            clamp_unit([
                c1[0] * (1.0 - frac) + c2[0] * frac,
                c1[1] * (1.0 - frac) + c2[1] * frac,
                c1[2] * (1.0 - frac) + c2[2] * frac,
                c1[3] * (1.0 - frac) + c2[3] * frac,
            ])
        }
    }
}

/// Evaluate the interpolation at `n` evenly spaced points over `[0, 1]`.
pub fn resample(samples: &[Rgba], n: usize) -> Vec<Rgba> {
    let last = n.saturating_sub(1).max(1) as f64;
    (0..n)
        .map(|i| interpolate(samples, i as f64 / last))
        .collect()
}

/// An ordered sequence of colors with a name and optional extremes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct Palette {
    name: String,
    samples: Vec<Rgba>,
    extremes: Extremes,
}

/// Unchecked wire form of a [`Palette`]
#[derive(Deserialize)]
struct RawPalette {
    #[serde(default = "default_name")]
    name: String,
    samples: Vec<Rgba>,
    #[serde(default)]
    extremes: Extremes,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl TryFrom<RawPalette> for Palette {
    type Error = HuecraftError;

    fn try_from(raw: RawPalette) -> Result<Self> {
        let extremes: Vec<Rgba> = [raw.extremes.bad, raw.extremes.under, raw.extremes.over]
            .into_iter()
            .flatten()
            .collect();
        check_unit_range(&extremes)?;
        Ok(Self::new(raw.name, raw.samples)?.with_extremes(raw.extremes))
    }
}

impl Palette {
    /// Build a palette from RGBA samples, each channel in `[0, 1]`
    pub fn new(name: impl Into<String>, samples: Vec<Rgba>) -> Result<Self> {
        if samples.is_empty() {
            return Err(HuecraftError::out_of_range("Must provide at least one color."));
        }
        check_unit_range(&samples)?;
        Ok(Self {
            name: name.into(),
            samples,
            extremes: Extremes::default(),
        })
    }

    /// Wrap samples taken from another colormap
    pub fn from_samples(samples: Vec<Rgba>, name: Option<&str>) -> Result<Self> {
        Self::new(name.unwrap_or(DEFAULT_NAME), samples)
    }

    /// Build from a list of colors whose tuples are read in `model`
    pub fn from_colors(colors: &[ColorInput], model: ColorModel, name: Option<&str>) -> Result<Self> {
        let samples = colors
            .iter()
            .map(|color| color.resolve(model))
            .collect::<Result<Vec<Rgba>>>()?;
        Self::new(name.unwrap_or(DEFAULT_NAME), samples)
    }

    /// Resolve a descriptor string against the process-wide registry
    pub fn from_name(descriptor: &str) -> Result<Self> {
        Self::from_name_in(descriptor, PaletteRegistry::global())
    }

    /// Resolve a descriptor string: look up the base, then resample,
    /// reverse and subset as its tokens say
    pub fn from_name_in(descriptor: &str, registry: &PaletteRegistry) -> Result<Self> {
        if registry.contains(descriptor) {
            let (name, samples) = registry.lookup(descriptor)?;
            return Self::new(name, samples);
        }
        let parsed = Descriptor::parse(descriptor)?;
        let (_, mut samples) = registry.lookup(&parsed.base)?;

        if let Some(n) = parsed.num_colors {
            if n == 0 {
                return Err(HuecraftError::out_of_range(
                    "Number of colors must be greater than 0.",
                ));
            }
            samples = resample(&samples, n);
        }
        if parsed.reverse {
            samples.reverse();
        }

        let palette = Self::new(parsed.name_before_subset(), samples)?;
        match &parsed.index {
            Some(index) => palette.subset(index),
            None => Ok(palette),
        }
    }

    fn derive(&self, name: String, samples: Vec<Rgba>, extremes: Extremes) -> Self {
        Self {
            name,
            samples,
            extremes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Rgba] {
        &self.samples
    }

    pub fn extremes(&self) -> &Extremes {
        &self.extremes
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a palette holds at least one sample
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rgba> {
        self.samples.iter()
    }

    /// Sample at `index`, counting from the end when negative
    pub fn sample(&self, index: i64) -> Option<&Rgba> {
        normalize_index(index, self.len()).map(|i| &self.samples[i])
    }

    /// Continuous color at `t` in `[0, 1]`
    pub fn at(&self, t: f64) -> Rgba {
        if t.is_nan() {
            return self.bad_color();
        }
        interpolate(&self.samples, t)
    }

    pub fn bad_color(&self) -> Rgba {
        self.extremes.bad.unwrap_or(TRANSPARENT)
    }

    pub fn under_color(&self) -> Rgba {
        self.extremes.under.unwrap_or(self.samples[0])
    }

    pub fn over_color(&self) -> Rgba {
        self.extremes.over.unwrap_or(self.samples[self.samples.len() - 1])
    }

    /// Color for a normalized value: NaN is bad, below 0 under, above 1 over,
    /// otherwise the sample whose bin contains the value
    pub fn map_normalized(&self, t: f64) -> Rgba {
        self.color(ColorIndex::from_normalized(t, self.len()))
    }

    /// Resolve a lookup-table position to a color
    pub fn color(&self, index: ColorIndex) -> Rgba {
        match index {
            ColorIndex::Bad => self.bad_color(),
            ColorIndex::Under => self.under_color(),
            ColorIndex::Over => self.over_color(),
            ColorIndex::Index(i) => self.samples[i.min(self.samples.len() - 1)],
        }
    }

    /// Resample to exactly `num_colors` samples, keeping extremes
    pub fn resize(&self, num_colors: i64) -> Result<Self> {
        if num_colors <= 0 {
            return Err(HuecraftError::out_of_range(format!(
                "Number of colors must be greater than 0; received {num_colors}."
            )));
        }
        debug!(palette = %self.name, from = self.len(), to = num_colors, "Resizing palette");
        let samples = resample(&self.samples, num_colors as usize);
        Ok(self.derive(self.name.clone(), samples, self.extremes))
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        self.derive(name.into(), self.samples.clone(), self.extremes)
    }

    /// Upsert into `registry`, optionally under a new name
    pub fn register(&self, registry: &PaletteRegistry, name: Option<&str>) -> Result<Self> {
        let palette = match name {
            Some(name) => self.rename(name),
            None => self.clone(),
        };
        registry.upsert(&palette.name, palette.samples.clone())?;
        Ok(palette)
    }

    /// Reverse the sample order; under and over trade places
    pub fn reverse(&self) -> Self {
        let samples = self.samples.iter().rev().copied().collect();
        let extremes = Extremes {
            bad: self.extremes.bad,
            under: self.extremes.over,
            over: self.extremes.under,
        };
        self.derive(encode_reverse(&self.name), samples, extremes)
    }

    /// Keep the samples selected by `index`.
    ///
    /// Scalar and list positions must exist; slices clamp to the palette.
    /// A selection of a single sample is widened to two copies of it.
    pub fn subset(&self, index: &IndexSpec) -> Result<Self> {
        if let IndexSpec::Slice(slice) = index {
            if slice.is_full_reversal() {
                return Ok(self.reverse());
            }
        }

        let len = self.len();
        let checked = |i: i64| {
            normalize_index(i, len).ok_or_else(|| {
                HuecraftError::out_of_range(format!(
                    "index {i} is out of bounds for palette with {len} samples"
                ))
            })
        };

        let (mut positions, encoded) = match index {
            IndexSpec::Single(i) => (vec![checked(*i)?], index.clone()),
            IndexSpec::List(indices) => {
                let positions = indices
                    .iter()
                    .map(|i| checked(*i))
                    .collect::<Result<Vec<usize>>>()?;
                let encoded = match indices.as_slice() {
                    [only] => IndexSpec::List(vec![*only, *only]),
                    _ => index.clone(),
                };
                (positions, encoded)
            }
            IndexSpec::Slice(slice) => (slice.indices(len)?, index.clone()),
        };

        if positions.is_empty() {
            return Err(HuecraftError::out_of_range(format!(
                "'{index}' selects no samples from palette with {len} samples"
            )));
        }
        if positions.len() == 1 {
            positions.push(positions[0]);
        }

        debug!(
            palette = %self.name,
            index = %encoded,
            selected = positions.len(),
            "Subsetting palette"
        );
        let samples = positions.iter().map(|&i| self.samples[i]).collect();
        Ok(self.derive(encode_subset(&self.name, &encoded), samples, self.extremes))
    }

    /// Samples of `self` followed by those of `other`; extremes are reset
    pub fn concatenate(&self, other: &Palette) -> Self {
        let mut samples = Vec::with_capacity(self.len() + other.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        self.derive(
            format!("{}_{}", self.name, other.name),
            samples,
            Extremes::default(),
        )
    }

    /// Set any of the bad/under/over colors, keeping those not given
    pub fn with_extremes(&self, extremes: Extremes) -> Self {
        self.derive(
            self.name.clone(),
            self.samples.clone(),
            self.extremes.merged(extremes),
        )
    }

    /// Adjust hue, saturation and brightness of every sample
    pub fn tweak(&self, adjust: &HsvAdjust, name: Option<&str>) -> Result<Self> {
        adjust.validate()?;
        debug!(palette = %self.name, ?adjust, "Tweaking palette");
        let samples = self.samples.iter().map(|s| adjust.apply(s)).collect();
        let name = name.map(str::to_string).unwrap_or_else(|| self.name.clone());
        Ok(self.derive(name, samples, self.extremes))
    }

    pub fn tweak_hue(&self, hue: f64) -> Result<Self> {
        self.tweak(&HsvAdjust::hue(hue), None)
    }

    pub fn tweak_saturation(&self, saturation: f64) -> Result<Self> {
        self.tweak(&HsvAdjust::saturation(saturation), None)
    }

    pub fn tweak_value(&self, value: f64) -> Result<Self> {
        self.tweak(&HsvAdjust::value(value), None)
    }

    /// Project the samples into `model`
    pub fn to_model(&self, model: ColorModel) -> ModelArray {
        let n = self.len();
        match model {
            ColorModel::Rgba => {
                ModelArray::Channels(Array2::from_shape_fn((n, 4), |(i, j)| self.samples[i][j]))
            }
            ColorModel::Rgb => {
                ModelArray::Channels(Array2::from_shape_fn((n, 3), |(i, j)| self.samples[i][j]))
            }
            ColorModel::Hsv => {
                let hsv: Vec<[f64; 3]> = self
                    .samples
                    .iter()
                    .map(|s| rgb_to_hsv([s[0], s[1], s[2]]))
                    .collect();
                ModelArray::Channels(Array2::from_shape_fn((n, 3), |(i, j)| hsv[i][j]))
            }
            ColorModel::Hex => ModelArray::Hex(self.samples.iter().map(to_hex).collect()),
        }
    }

    /// Parse `model` and project; unknown names list the valid models
    pub fn to_model_named(&self, model: &str) -> Result<ModelArray> {
        Ok(self.to_model(model.parse()?))
    }

    pub fn repr(&self) -> String {
        format!("Palette('{}')", self.name)
    }
}

/// Equality compares samples only; names and extremes are ignored.
impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.samples == other.samples
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} colors)", self.name, self.len())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgba;
    type IntoIter = std::slice::Iter<'a, Rgba>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { index + len } else { index };
    (0..len).contains(&resolved).then_some(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SliceSpec;
    use pretty_assertions::assert_eq;

    fn basic() -> Palette {
        Palette::from_colors(
            &["red".into(), "green".into(), "blue".into(), "yellow".into()],
            ColorModel::Rgb,
            Some("basic"),
        )
        .unwrap()
    }

    fn rgb3() -> Palette {
        Palette::from_colors(
            &["red".into(), "green".into(), "blue".into()],
            ColorModel::Rgb,
            Some("testmap"),
        )
        .unwrap()
        .resize(256)
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = Palette::new("empty", vec![]).unwrap_err();
        assert_eq!(err.to_string(), "Out of range: Must provide at least one color.");
    }

    #[test]
    fn test_from_colors_default_name() {
        let palette = Palette::from_colors(&["red".into(), "blue".into()], ColorModel::Rgb, None).unwrap();
        assert_eq!(palette.name(), DEFAULT_NAME);
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_from_colors_hsv() {
        let colors: Vec<ColorInput> = vec![[0.0, 1.0, 1.0].into(), [0.5, 1.0, 1.0].into()];
        let palette = Palette::from_colors(&colors, ColorModel::Hsv, None).unwrap();
        assert_eq!(palette.samples()[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette.samples()[1], [0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_from_colors_invalid_name() {
        let result = Palette::from_colors(&["red".into(), "not_a_color".into()], ColorModel::Rgb, None);
        assert!(matches!(result, Err(HuecraftError::Lookup { .. })));
    }

    #[test]
    fn test_resize() {
        let palette = rgb3();
        assert_eq!(palette.len(), 256);
        assert_eq!(palette.resize(10).unwrap().len(), 10);
        assert_eq!(palette.resize(1).unwrap().len(), 1);
        assert!(matches!(palette.resize(0), Err(HuecraftError::OutOfRange { .. })));
        assert!(matches!(palette.resize(-3), Err(HuecraftError::OutOfRange { .. })));
    }

    #[test]
    fn test_resize_keeps_endpoints_and_midpoint() {
        let palette = Palette::new("bw", vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]]).unwrap();
        let resized = palette.resize(3).unwrap();
        assert_eq!(resized.samples()[0], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(resized.samples()[1], [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(resized.samples()[2], [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_resize_keeps_extremes() {
        let black = [0.0, 0.0, 0.0, 1.0];
        let palette = rgb3().with_extremes(Extremes {
            bad: Some(black),
            under: Some(black),
            over: Some(black),
        });
        let resized = palette.resize(10).unwrap();
        assert_eq!(resized.extremes().bad, Some(black));
        assert_eq!(resized.extremes().under, Some(black));
        assert_eq!(resized.extremes().over, Some(black));
    }

    #[test]
    fn test_with_extremes_merges() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 1.0];
        let palette = basic()
            .with_extremes(Extremes { under: Some(red), ..Extremes::default() })
            .with_extremes(Extremes { over: Some(blue), ..Extremes::default() });
        assert_eq!(palette.under_color(), red);
        assert_eq!(palette.over_color(), blue);
        assert_eq!(palette.bad_color(), TRANSPARENT);
    }

    #[test]
    fn test_reverse() {
        let palette = rgb3();
        let reversed = palette.reverse();
        assert_eq!(reversed.samples()[0], palette.samples()[255]);
        assert_eq!(reversed.name(), "testmap_r");
        assert_eq!(reversed.reverse(), palette);
        assert_eq!(reversed.reverse().name(), "testmap_r");
    }

    #[test]
    fn test_subset_single_index_widens() {
        let subset = basic().subset(&IndexSpec::Single(1)).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.samples()[0], subset.samples()[1]);
        assert_eq!(subset.name(), "basic_i1");
    }

    #[test]
    fn test_subset_single_element_list() {
        let subset = basic().subset(&IndexSpec::List(vec![2])).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.name(), "basic_i2,2");
    }

    #[test]
    fn test_subset_list_keeps_order() {
        let palette = basic();
        let subset = palette.subset(&IndexSpec::List(vec![3, 0, -1])).unwrap();
        assert_eq!(subset.name(), "basic_i3,0,-1");
        assert_eq!(subset.samples()[0], palette.samples()[3]);
        assert_eq!(subset.samples()[1], palette.samples()[0]);
        assert_eq!(subset.samples()[2], palette.samples()[3]);
    }

    #[test]
    fn test_subset_slices() {
        let subset = basic().subset(&SliceSpec::new(Some(1), Some(3), None).into()).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.name(), "basic_i1:3");

        let strided = rgb3().subset(&SliceSpec::new(None, None, Some(2)).into()).unwrap();
        assert_eq!(strided.len(), 128);
        assert_eq!(strided.name(), "testmap_i::2");

        let window = rgb3().subset(&SliceSpec::new(Some(10), Some(20), None).into()).unwrap();
        assert_eq!(window.len(), 10);
    }

    #[test]
    fn test_subset_full_reversal_is_reverse() {
        let palette = basic();
        let reversed = palette.subset(&SliceSpec::reversed().into()).unwrap();
        assert_eq!(reversed, palette.reverse());
        assert_eq!(reversed.name(), "basic_r");
    }

    #[test]
    fn test_subset_out_of_range() {
        let palette = basic();
        assert!(matches!(
            palette.subset(&IndexSpec::Single(1000)),
            Err(HuecraftError::OutOfRange { .. })
        ));
        assert!(matches!(
            palette.subset(&IndexSpec::List(vec![0, 1000])),
            Err(HuecraftError::OutOfRange { .. })
        ));
        assert!(matches!(
            rgb3().subset(&SliceSpec::new(Some(1000), Some(2000), None).into()),
            Err(HuecraftError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_concatenate() {
        let first = rgb3();
        let second = Palette::from_colors(&["yellow".into(), "cyan".into()], ColorModel::Rgb, Some("testmap2"))
            .unwrap()
            .resize(256)
            .unwrap()
            .with_extremes(Extremes { bad: Some([1.0, 1.0, 1.0, 1.0]), ..Extremes::default() });
        let combined = first.concatenate(&second);
        assert_eq!(combined.len(), 512);
        assert_eq!(combined.name(), "testmap_testmap2");
        assert_eq!(&combined.samples()[..256], first.samples());
        assert!(combined.extremes().is_unset());
    }

    #[test]
    fn test_tweak_each_channel() {
        let palette = rgb3();
        assert_eq!(palette.tweak_hue(50.0).unwrap().len(), 256);
        assert_eq!(palette.tweak_saturation(5.0).unwrap().len(), 256);
        assert_eq!(palette.tweak_value(2.0).unwrap().len(), 256);
        let all = HsvAdjust {
            hue: Some(50.0),
            saturation: Some(5.0),
            value: Some(2.0),
        };
        assert_eq!(palette.tweak(&all, Some("tweaked")).unwrap().name(), "tweaked");
    }

    #[test]
    fn test_tweak_edges() {
        let palette = rgb3();
        assert!(palette.tweak_hue(-254.9).is_ok());
        assert!(palette.tweak_hue(254.9).is_ok());
        assert!(palette.tweak_saturation(-10.0).is_ok());
        assert!(palette.tweak_saturation(10.0).is_ok());
        assert!(palette.tweak_value(0.0).is_ok());
        assert!(palette.tweak_value(3.0).is_ok());
    }

    #[test]
    fn test_tweak_out_of_range() {
        let palette = rgb3();
        for result in [
            palette.tweak_hue(300.0),
            palette.tweak_hue(255.0),
            palette.tweak_hue(-255.0),
            palette.tweak_saturation(20.0),
            palette.tweak_value(4.0),
            palette.tweak_value(-0.1),
        ] {
            assert!(matches!(result, Err(HuecraftError::OutOfRange { .. })));
        }
        let err = palette.tweak_saturation(20.0).unwrap_err();
        assert!(err.to_string().contains("between -10 and 10"));
    }

    #[test]
    fn test_tweak_hue_wraps() {
        let red = Palette::new("red", vec![[1.0, 0.0, 0.0, 1.0]]).unwrap();
        // a third of the way round the wheel is green
        let shifted = red.tweak_hue(85.0).unwrap();
        let [r, g, b, a] = shifted.samples()[0];
        assert!(r < 1e-9 && (g - 1.0).abs() < 1e-9 && b < 1e-9);
        assert_eq!(a, 1.0);
        let back = red.tweak_hue(-170.0).unwrap();
        assert!((back.samples()[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tweak_value_clips_and_keeps_alpha() {
        let palette = Palette::new("p", vec![[0.5, 0.25, 0.25, 0.5]]).unwrap();
        let brighter = palette.tweak_value(3.0).unwrap();
        let sample = brighter.samples()[0];
        assert!(sample.iter().all(|c| (0.0..=1.0).contains(c)));
        assert_eq!(sample[0], 1.0);
        assert_eq!(sample[3], 0.5);
    }

    #[test]
    fn test_to_model() {
        let palette = rgb3();
        match palette.to_model(ColorModel::Rgba) {
            ModelArray::Channels(a) => assert_eq!(a.dim(), (256, 4)),
            other => panic!("unexpected {other:?}"),
        }
        match palette.to_model(ColorModel::Rgb) {
            ModelArray::Channels(a) => {
                assert_eq!(a.dim(), (256, 3));
                assert_eq!(a.row(0).to_vec(), palette.samples()[0][..3].to_vec());
            }
            other => panic!("unexpected {other:?}"),
        }
        match palette.to_model(ColorModel::Hsv) {
            ModelArray::Channels(a) => assert_eq!(a.dim(), (256, 3)),
            other => panic!("unexpected {other:?}"),
        }
        match palette.to_model(ColorModel::Hex) {
            ModelArray::Hex(codes) => {
                assert_eq!(codes.len(), 256);
                assert_eq!(codes[0], "#ff0000");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_to_model_named_rejects_unknown() {
        let err = rgb3().to_model_named("unsupported_model").unwrap_err();
        assert!(matches!(err, HuecraftError::InvalidParameter { .. }));
        assert!(err.to_string().contains("hex"));
    }

    #[test]
    fn test_display_and_repr() {
        let palette = rgb3();
        assert_eq!(palette.to_string(), "testmap (256 colors)");
        assert_eq!(palette.repr(), "Palette('testmap')");
    }

    #[test]
    fn test_equality_ignores_name() {
        assert_eq!(rgb3(), rgb3().rename("other"));
        assert_ne!(rgb3(), rgb3().resize(10).unwrap());
    }

    #[test]
    fn test_map_normalized() {
        let palette = basic();
        assert_eq!(palette.map_normalized(0.0), palette.samples()[0]);
        assert_eq!(palette.map_normalized(1.0), palette.samples()[3]);
        assert_eq!(palette.map_normalized(0.3), palette.samples()[1]);
        assert_eq!(palette.map_normalized(-0.1), palette.under_color());
        assert_eq!(palette.map_normalized(f64::NAN), TRANSPARENT);
        assert_eq!(ColorIndex::from_normalized(1.5, 4), ColorIndex::Over);
        assert_eq!(ColorIndex::from_normalized(0.99, 4), ColorIndex::Index(3));
    }

    #[test]
    fn test_register() {
        let registry = PaletteRegistry::new();
        let registered = basic().register(&registry, Some("mine")).unwrap();
        assert_eq!(registered.name(), "mine");
        let (name, samples) = registry.lookup("MINE").unwrap();
        assert_eq!(name, "mine");
        assert_eq!(samples, basic().samples().to_vec());
    }

    #[test]
    fn test_sample_and_iter() {
        let palette = basic();
        assert_eq!(palette.sample(-1), palette.samples().last());
        assert_eq!(palette.sample(4), None);
        assert_eq!(palette.iter().count(), 4);
        assert_eq!((&palette).into_iter().count(), 4);
    }

    #[test]
    fn test_every_builtin_loads_by_name() {
        let registry = PaletteRegistry::with_builtins();
        for name in registry.names() {
            let plain = Palette::from_name_in(&name, &registry)
                .unwrap_or_else(|err| panic!("{name}: {err}"));
            assert!(!plain.is_empty(), "{name}");
            let resized = Palette::from_name_in(&format!("{name}_n10"), &registry)
                .unwrap_or_else(|err| panic!("{name}_n10: {err}"));
            assert_eq!(resized.len(), 10, "{name}");
            let reversed = Palette::from_name_in(&format!("{name}_n10_r"), &registry)
                .unwrap_or_else(|err| panic!("{name}_n10_r: {err}"));
            assert_eq!(reversed.samples()[0], resized.samples()[9], "{name}");
        }
    }

    #[test]
    fn test_interpolation_stays_in_unit_range() {
        let palette = Palette::new("drift", vec![[0.1, 0.2, 0.3, 1.0], [0.7, 0.9, 1.0, 1.0]]).unwrap();
        for sample in resample(palette.samples(), 1000) {
            assert!(sample.iter().all(|c| (0.0..=1.0).contains(c)), "{sample:?}");
        }
        assert!(palette.resize(777).is_ok());
    }

    #[test]
    fn test_at_nan_is_bad_color() {
        let palette = basic();
        assert_eq!(palette.at(f64::NAN), TRANSPARENT);
        let marked = palette.with_extremes(Extremes {
            bad: Some([1.0, 0.0, 1.0, 1.0]),
            ..Extremes::default()
        });
        assert_eq!(marked.at(f64::NAN), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(interpolate(palette.samples(), f64::NAN), TRANSPARENT);
    }

    #[test]
    fn test_deserialize_checks_samples() {
        let empty = serde_json::from_str::<Palette>(r#"{"name":"x","samples":[]}"#);
        assert!(empty.is_err());
        let wild = serde_json::from_str::<Palette>(r#"{"samples":[[5.0,-1.0,0.0,1.0]]}"#);
        assert!(wild.is_err());
        let bad_extreme = serde_json::from_str::<Palette>(
            r#"{"samples":[[0.0,0.0,0.0,1.0]],"extremes":{"under":[2.0,0.0,0.0,1.0]}}"#,
        );
        assert!(bad_extreme.is_err());

        let palette: Palette = serde_json::from_str(
            r#"{"samples":[[0.0,0.0,0.0,1.0],[1.0,1.0,1.0,1.0]],"extremes":{"over":[1.0,0.0,0.0,1.0]}}"#,
        )
        .unwrap();
        assert_eq!(palette.name(), DEFAULT_NAME);
        assert_eq!(palette.over_color(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette.under_color(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_registered_suffix_name_resolves_exactly() {
        let registry = PaletteRegistry::with_builtins();
        let dusk = basic().register(&registry, Some("dusk_r")).unwrap();
        let found = Palette::from_name_in("dusk_r", &registry).unwrap();
        assert_eq!(found, dusk);
        assert_eq!(found.name(), "dusk_r");

        let viridis = Palette::from_name_in("viridis_n10_r", &registry).unwrap();
        viridis.register(&registry, None).unwrap();
        let again = Palette::from_name_in("VIRIDIS_N10_R", &registry).unwrap();
        assert_eq!(again, viridis);
        assert_eq!(again.name(), "viridis_n10_r");
    }
}
