//! Palettes and the colors they are built from.
//!
//! Built-in palettes are grouped the usual way: sequential ramps, diverging
//! maps and qualitative sets. All of them are seeded into the
//! [`PaletteRegistry`] on first use.

pub mod color;
pub mod diverging;
pub mod palette;
pub mod qualitative;
pub mod registry;
pub mod sequential;

pub use color::{resolve_color, ColorInput, ColorModel, Rgba};
pub use palette::{ColorIndex, Extremes, HsvAdjust, ModelArray, Palette};
pub use registry::PaletteRegistry;
