//! Sequential base palettes (single-hue or perceptual progressions).
//!
//! These are sampled from the `colorgrad` presets at a fixed resolution so
//! every sequential palette starts out with the same number of samples.

use colorgrad::Gradient;

use super::color::{clamp_unit, Rgba};

/// Samples taken from each continuous preset
pub const SEQUENTIAL_SAMPLES: usize = 256;

fn sample_gradient(gradient: &Gradient, n: usize) -> Vec<Rgba> {
    let last = (n.max(2) - 1) as f64;
    (0..n)
        .map(|i| {
            let color = gradient.at(i as f64 / last);
            clamp_unit([color.r, color.g, color.b, color.a])
        })
        .collect()
}

/// Built-in sequential palettes as `(name, samples)` pairs
pub fn builtins() -> Vec<(&'static str, Vec<Rgba>)> {
    let presets: [(&'static str, Gradient); 11] = [
        ("viridis", colorgrad::viridis()),
        ("plasma", colorgrad::plasma()),
        ("inferno", colorgrad::inferno()),
        ("magma", colorgrad::magma()),
        ("cividis", colorgrad::cividis()),
        ("turbo", colorgrad::turbo()),
        ("rainbow", colorgrad::rainbow()),
        ("Spectral", colorgrad::spectral()),
        ("Greys", colorgrad::greys()),
        ("Blues", colorgrad::blues()),
        ("Reds", colorgrad::reds()),
    ];

    presets
        .iter()
        .map(|(name, gradient)| (*name, sample_gradient(gradient, SEQUENTIAL_SAMPLES)))
        .collect()
}
