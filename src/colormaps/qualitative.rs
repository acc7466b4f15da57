//! Qualitative base palettes: a handful of distinct colors, no interpolation
//! intended between neighbours.

use super::color::Rgba;
use super::diverging::table_to_samples;

const TAB10: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

const SET1: [[u8; 3]; 9] = [
    [228, 26, 28],
    [55, 126, 184],
    [77, 175, 74],
    [152, 78, 163],
    [255, 127, 0],
    [255, 255, 51],
    [166, 86, 40],
    [247, 129, 191],
    [153, 153, 153],
];

/// Built-in qualitative palettes at their native length
pub fn builtins() -> Vec<(&'static str, Vec<Rgba>)> {
    vec![
        ("tab10", table_to_samples(&TAB10)),
        ("Set1", table_to_samples(&SET1)),
    ]
}
