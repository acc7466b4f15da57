//! Color sample conversion.
//!
//! Every color that enters a palette is resolved here into a canonical RGBA
//! sample: four `f64` channels in `[0, 1]`. Names and hex strings go through
//! the CSS color parser bundled with `colorgrad`; tuples are validated as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::registry::close_matches;
use crate::error::{HuecraftError, Result};

/// A canonical color sample: red, green, blue, alpha in `[0, 1]`.
pub type Rgba = [f64; 4];

/// Single-letter base colors accepted on top of the CSS names.
const SHORTHAND_COLORS: [(&str, Rgba); 8] = [
    ("b", [0.0, 0.0, 1.0, 1.0]),
    ("g", [0.0, 0.5, 0.0, 1.0]),
    ("r", [1.0, 0.0, 0.0, 1.0]),
    ("c", [0.0, 0.75, 0.75, 1.0]),
    ("m", [0.75, 0.0, 0.75, 1.0]),
    ("y", [0.75, 0.75, 0.0, 1.0]),
    ("k", [0.0, 0.0, 0.0, 1.0]),
    ("w", [1.0, 1.0, 1.0, 1.0]),
];

/// Named colors known to the parser, used for suggestions on a failed lookup.
pub const COLOR_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// Color models a palette can be built from or projected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// Red, green, blue, alpha
    Rgba,
    /// Red, green, blue
    Rgb,
    /// Hue, saturation, value
    Hsv,
    /// `#rrggbb` hex code
    Hex,
}

impl ColorModel {
    pub const ALL: [ColorModel; 4] = [
        ColorModel::Rgba,
        ColorModel::Rgb,
        ColorModel::Hsv,
        ColorModel::Hex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorModel::Rgba => "rgba",
            ColorModel::Rgb => "rgb",
            ColorModel::Hsv => "hsv",
            ColorModel::Hex => "hex",
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorModel {
    type Err = HuecraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        ColorModel::ALL
            .into_iter()
            .find(|model| model.as_str() == lowered)
            .ok_or_else(|| HuecraftError::InvalidParameter {
                param: "color_model".to_string(),
                message: format!(
                    "Invalid color model: '{}'; select from: {:?}.",
                    s,
                    ColorModel::ALL.map(|m| m.as_str())
                ),
            })
    }
}

/// One color as supplied by a caller, before resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    /// A color name or hex string
    Name(String),
    /// Three channels; RGB or HSV depending on the declared model
    Triple([f64; 3]),
    /// Four channels, the last being alpha
    Quad([f64; 4]),
}

impl ColorInput {
    /// Resolve to RGBA, interpreting tuples in `model` (`Rgb`/`Rgba` or `Hsv`).
    pub fn resolve(&self, model: ColorModel) -> Result<Rgba> {
        match self {
            ColorInput::Name(name) => resolve_color(name),
            ColorInput::Triple([a, b, c]) => from_channels([*a, *b, *c, 1.0], model),
            ColorInput::Quad(channels) => from_channels(*channels, model),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(name: &str) -> Self {
        ColorInput::Name(name.to_string())
    }
}

impl From<[f64; 3]> for ColorInput {
    fn from(channels: [f64; 3]) -> Self {
        ColorInput::Triple(channels)
    }
}

impl From<[f64; 4]> for ColorInput {
    fn from(channels: [f64; 4]) -> Self {
        ColorInput::Quad(channels)
    }
}

fn from_channels(channels: [f64; 4], model: ColorModel) -> Result<Rgba> {
    if let Some(bad) = channels.iter().find(|c| !(0.0..=1.0).contains(*c)) {
        return Err(HuecraftError::out_of_range(format!(
            "color channel {bad} in {channels:?} is outside [0, 1]"
        )));
    }
    match model {
        ColorModel::Hsv => {
            let [r, g, b] = hsv_to_rgb([channels[0], channels[1], channels[2]]);
            Ok([r, g, b, channels[3]])
        }
        ColorModel::Rgb | ColorModel::Rgba => Ok(channels),
        ColorModel::Hex => Err(HuecraftError::InvalidParameter {
            param: "color_model".to_string(),
            message: "numeric tuples cannot be read as hex".to_string(),
        }),
    }
}

/// Resolve a color name or hex string to an RGBA sample.
pub fn resolve_color(name: &str) -> Result<Rgba> {
    if let Some((_, rgba)) = SHORTHAND_COLORS.iter().find(|(short, _)| *short == name) {
        return Ok(*rgba);
    }

    match colorgrad::Color::from_html(name) {
        Ok(color) => Ok([color.r, color.g, color.b, color.a]),
        Err(_) => {
            let suggestions = close_matches(&name.to_lowercase(), COLOR_NAMES.iter().copied(), 5, 0.6);
            Err(HuecraftError::Lookup {
                kind: "color".to_string(),
                name: name.to_string(),
                suggestions,
            })
        }
    }
}

/// Convert RGB to HSV; all channels, hue included, in `[0, 1]`.
pub fn rgb_to_hsv([r, g, b]: [f64; 3]) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta <= 0.0 {
        return [0.0, s, max];
    }

    let h = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };

    [(h / 6.0).rem_euclid(1.0), s, max]
}

/// Convert HSV (hue in `[0, 1]`) to RGB.
pub fn hsv_to_rgb([h, s, v]: [f64; 3]) -> [f64; 3] {
    if s <= 0.0 {
        return [v, v, v];
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Clamp every channel into `[0, 1]`, absorbing rounding drift
pub fn clamp_unit(sample: Rgba) -> Rgba {
    sample.map(|c| c.clamp(0.0, 1.0))
}

/// Fail on the first sample with a channel outside `[0, 1]` (NaN included)
pub(crate) fn check_unit_range(samples: &[Rgba]) -> Result<()> {
    match samples
        .iter()
        .find(|s| s.iter().any(|c| !(0.0..=1.0).contains(c)))
    {
        Some(bad) => Err(HuecraftError::out_of_range(format!(
            "sample {bad:?} has a channel outside [0, 1]"
        ))),
        None => Ok(()),
    }
}

/// Format the RGB channels of a sample as `#rrggbb`.
pub fn to_hex(rgba: &Rgba) -> String {
    let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(rgba[0]), byte(rgba[1]), byte(rgba[2]))
}
