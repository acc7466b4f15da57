//! Diverging base palettes (two-hue progression through a neutral center).
//!
//! These suit data that diverges from a central value. The tables hold the
//! anchor colors; they are interpolated up to a fixed resolution on load.

use super::color::Rgba;
use super::palette::resample;

/// Samples produced from each anchor table
pub const DIVERGING_SAMPLES: usize = 256;

const COOLWARM: [[u8; 3]; 32] = [
    [59, 76, 192], // Dark blue
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221], // White/gray in the middle
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47], // Dark red
];

const RDBU: [[u8; 3]; 32] = [
    [192, 40, 47], // Dark red
    [203, 62, 56],
    [213, 80, 66],
    [222, 96, 77],
    [229, 112, 88],
    [236, 127, 99],
    [241, 141, 111],
    [244, 154, 123],
    [247, 166, 135],
    [247, 177, 148],
    [247, 187, 160],
    [245, 196, 173],
    [241, 204, 185],
    [236, 211, 197],
    [229, 216, 209],
    [221, 221, 221], // White/gray in the middle
    [213, 219, 230],
    [204, 217, 238],
    [194, 213, 244],
    [184, 208, 249],
    [174, 201, 253],
    [163, 194, 255],
    [152, 185, 255],
    [141, 176, 254],
    [130, 165, 251],
    [119, 154, 247],
    [108, 142, 241],
    [98, 130, 234],
    [87, 117, 225],
    [77, 104, 215],
    [68, 90, 204],
    [59, 76, 192], // Dark blue
];

const SEISMIC: [[u8; 3]; 15] = [
    [0, 0, 127], // Dark blue
    [0, 0, 191],
    [0, 63, 255],
    [0, 127, 255],
    [0, 191, 255],
    [127, 223, 255],
    [191, 239, 255],
    [255, 255, 255], // White in the middle
    [255, 239, 191],
    [255, 223, 127],
    [255, 191, 0],
    [255, 127, 0],
    [255, 63, 0],
    [191, 0, 0],
    [127, 0, 0], // Dark red
];

/// Convert an 8-bit RGB table into opaque RGBA samples.
pub(crate) fn table_to_samples(table: &[[u8; 3]]) -> Vec<Rgba> {
    table
        .iter()
        .map(|[r, g, b]| {
            [
                f64::from(*r) / 255.0,
                f64::from(*g) / 255.0,
                f64::from(*b) / 255.0,
                1.0,
            ]
        })
        .collect()
}

/// Built-in diverging palettes as `(name, samples)` pairs
pub fn builtins() -> Vec<(&'static str, Vec<Rgba>)> {
    [
        ("coolwarm", &COOLWARM[..]),
        ("RdBu", &RDBU[..]),
        ("seismic", &SEISMIC[..]),
    ]
    .into_iter()
    .map(|(name, table)| (name, resample(&table_to_samples(table), DIVERGING_SAMPLES)))
    .collect()
}
