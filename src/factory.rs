//! Palette factory.
//!
//! [`cook`] accepts any supported palette source and applies the optional
//! post-processing steps in a fixed order: extremes, resize, reverse, then
//! rename and register.

use tracing::debug;

use crate::colormaps::{ColorInput, ColorModel, Extremes, Palette, PaletteRegistry, Rgba};
use crate::error::{HuecraftError, Result};

/// Where a palette comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteSource {
    /// A descriptor string such as `viridis_n10_r`
    Name(String),
    /// RGBA samples lifted from another colormap
    Samples(Vec<Rgba>),
    /// Colors to interpolate between, names or tuples
    Colors(Vec<ColorInput>),
    /// An existing palette, used as-is
    Palette(Palette),
}

impl From<&str> for PaletteSource {
    fn from(name: &str) -> Self {
        PaletteSource::Name(name.to_string())
    }
}

impl From<String> for PaletteSource {
    fn from(name: String) -> Self {
        PaletteSource::Name(name)
    }
}

impl From<Vec<ColorInput>> for PaletteSource {
    fn from(colors: Vec<ColorInput>) -> Self {
        PaletteSource::Colors(colors)
    }
}

impl From<Palette> for PaletteSource {
    fn from(palette: Palette) -> Self {
        PaletteSource::Palette(palette)
    }
}

/// Post-processing applied by [`cook`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookOptions {
    /// Resample to this many colors
    pub num_colors: Option<i64>,
    pub reverse: bool,
    /// Rename to this and register in the registry
    pub name: Option<String>,
    pub bad: Option<ColorInput>,
    pub under: Option<ColorInput>,
    pub over: Option<ColorInput>,
    /// How to read color tuples; required unless the colors are names
    pub color_model: Option<ColorModel>,
}

impl CookOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_colors(mut self, num_colors: i64) -> Self {
        self.num_colors = Some(num_colors);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn bad(mut self, color: impl Into<ColorInput>) -> Self {
        self.bad = Some(color.into());
        self
    }

    pub fn under(mut self, color: impl Into<ColorInput>) -> Self {
        self.under = Some(color.into());
        self
    }

    pub fn over(mut self, color: impl Into<ColorInput>) -> Self {
        self.over = Some(color.into());
        self
    }

    pub fn color_model(mut self, model: ColorModel) -> Self {
        self.color_model = Some(model);
        self
    }

    fn extremes(&self) -> Result<Extremes> {
        let resolve = |color: &Option<ColorInput>| {
            color
                .as_ref()
                .map(|color| color.resolve(ColorModel::Rgba))
                .transpose()
        };
        Ok(Extremes {
            bad: resolve(&self.bad)?,
            under: resolve(&self.under)?,
            over: resolve(&self.over)?,
        })
    }
}

/// Build a palette from `source` against `registry`
pub fn cook(source: PaletteSource, options: &CookOptions, registry: &PaletteRegistry) -> Result<Palette> {
    let mut palette = match source {
        PaletteSource::Name(descriptor) => Palette::from_name_in(&descriptor, registry)?,
        PaletteSource::Samples(samples) => Palette::from_samples(samples, None)?,
        PaletteSource::Colors(colors) => {
            if colors.is_empty() {
                return Err(HuecraftError::out_of_range("Must provide at least one color."));
            }
            // names and RGBA quads read the same under any model; bare triples do not
            let has_triple = colors.iter().any(|color| matches!(color, ColorInput::Triple(_)));
            let model = match options.color_model {
                Some(model) => model,
                None if !has_triple => ColorModel::Rgba,
                None => {
                    return Err(HuecraftError::AmbiguousInput {
                        message: "Please specify from_color_model to differentiate \
                                  between RGB and HSV color models."
                            .to_string(),
                    })
                }
            };
            Palette::from_colors(&colors, model, None)?
        }
        PaletteSource::Palette(palette) => palette,
    };

    let extremes = options.extremes()?;
    if !extremes.is_unset() {
        palette = palette.with_extremes(extremes);
    }
    if let Some(num_colors) = options.num_colors {
        palette = palette.resize(num_colors)?;
    }
    if options.reverse {
        palette = palette.reverse();
    }
    if let Some(name) = &options.name {
        palette = palette.register(registry, Some(name))?;
    }

    debug!(palette = %palette.name(), samples = palette.len(), "Cooked palette");
    Ok(palette)
}

/// Build a palette against the process-wide registry
pub fn cook_palette(source: impl Into<PaletteSource>, options: &CookOptions) -> Result<Palette> {
    cook(source.into(), options, PaletteRegistry::global())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::palette::DEFAULT_NAME;
    use pretty_assertions::assert_eq;

    fn registry() -> PaletteRegistry {
        PaletteRegistry::with_builtins()
    }

    #[test]
    fn test_cook_from_name() {
        let registry = registry();
        let palette = cook("viridis".into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(palette.name(), "viridis");
        assert_eq!(palette.len(), 256);
    }

    #[test]
    fn test_cook_reversed_name_matches_base() {
        let registry = registry();
        let base = cook("viridis".into(), &CookOptions::new(), &registry).unwrap();
        let reversed = cook("viridis_r".into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(reversed.samples()[0], base.samples()[base.len() - 1]);
    }

    #[test]
    fn test_cook_applies_resize_before_reverse() {
        let registry = registry();
        let options = CookOptions::new().num_colors(10).reverse(true);
        let palette = cook("viridis".into(), &options, &registry).unwrap();
        let resized = cook("viridis".into(), &CookOptions::new().num_colors(10), &registry).unwrap();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette, resized.reverse());
        assert_eq!(palette.name(), "viridis_r");
    }

    #[test]
    fn test_cook_named_colors_need_no_model() {
        let registry = registry();
        let colors: Vec<ColorInput> = vec!["red".into(), "#00ff00".into()];
        let palette = cook(colors.into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(palette.name(), DEFAULT_NAME);
        assert_eq!(palette.samples()[1], [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_cook_tuples_require_model() {
        let registry = registry();
        let colors: Vec<ColorInput> = vec![[0.0, 1.0, 1.0].into(), [0.5, 1.0, 1.0].into()];
        let err = cook(colors.clone().into(), &CookOptions::new(), &registry).unwrap_err();
        assert!(matches!(err, HuecraftError::AmbiguousInput { .. }));
        assert!(err.to_string().contains("from_color_model"));

        let hsv = cook(
            colors.into(),
            &CookOptions::new().color_model(ColorModel::Hsv),
            &registry,
        )
        .unwrap();
        assert_eq!(hsv.samples()[0], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_cook_quads_need_no_model() {
        let registry = registry();
        let colors: Vec<ColorInput> = vec![[1.0, 0.0, 0.0, 1.0].into(), [0.0, 0.0, 1.0, 0.5].into()];
        let palette = cook(colors.into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(palette.samples(), &[[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 0.5]]);
    }

    #[test]
    fn test_cook_any_triple_requires_model() {
        let registry = registry();
        let colors: Vec<ColorInput> = vec!["red".into(), [0.0, 1.0, 1.0].into()];
        let err = cook(colors.clone().into(), &CookOptions::new(), &registry).unwrap_err();
        assert!(matches!(err, HuecraftError::AmbiguousInput { .. }));

        let rgb = cook(
            colors.into(),
            &CookOptions::new().color_model(ColorModel::Rgb),
            &registry,
        )
        .unwrap();
        assert_eq!(rgb.samples()[1], [0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_cook_empty_colors() {
        let registry = registry();
        let result = cook(PaletteSource::Colors(vec![]), &CookOptions::new(), &registry);
        assert!(matches!(result, Err(HuecraftError::OutOfRange { .. })));
    }

    #[test]
    fn test_cook_sets_extremes_then_resizes() {
        let registry = registry();
        let options = CookOptions::new()
            .bad("black")
            .under("white")
            .over([1.0, 0.0, 0.0])
            .num_colors(5);
        let palette = cook("viridis".into(), &options, &registry).unwrap();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.bad_color(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette.under_color(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(palette.over_color(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_cook_with_name_registers() {
        let registry = registry();
        let palette = cook(
            "magma_n8".into(),
            &CookOptions::new().name("my_magma"),
            &registry,
        )
        .unwrap();
        assert_eq!(palette.name(), "my_magma");
        let again = cook("my_magma".into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(again, palette);
    }

    #[test]
    fn test_cook_passes_palettes_through() {
        let registry = registry();
        let original = cook("plasma_n4".into(), &CookOptions::new(), &registry).unwrap();
        let cooked = cook(original.clone().into(), &CookOptions::new(), &registry).unwrap();
        assert_eq!(cooked, original);
        assert_eq!(cooked.name(), "plasma_n4");
    }

    #[test]
    fn test_cook_from_samples() {
        let registry = registry();
        let source = PaletteSource::Samples(vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]]);
        let palette = cook(source, &CookOptions::new().num_colors(3), &registry).unwrap();
        assert_eq!(palette.samples()[1], [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_cook_unknown_name() {
        let registry = registry();
        let err = cook("virid".into(), &CookOptions::new(), &registry).unwrap_err();
        assert!(err.suggestions().iter().any(|s| s == "viridis"));
    }
}
