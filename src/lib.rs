//! # huecraft
//!
//! Cook, transform and name color palettes for data visualization.
//!
//! This library builds palettes from names, color lists or sample tables,
//! transforms them without mutation, and encodes those transforms into
//! palette names so a palette can be requested by a single string.
//!
//! ## Key Features
//!
//! - **Descriptor names**: `viridis_n10_r_i2:8` resamples, reverses and subsets in one string
//! - **Immutable transforms**: resize, subset, reverse, concatenate and HSV tweaks
//! - **Legend layout**: boundary or linear normalization with tick placement and labels
//! - **Helpful lookups**: unknown names come back with close matches
//!
//! ## Architecture
//!
//! - **Colormaps**: color conversion, the [`Palette`] entity and the [`PaletteRegistry`]
//! - **Descriptor**: the name codec for `_n`, `_r` and `_i` suffixes
//! - **Factory / Recipe**: orchestration from heterogeneous sources and JSON recipes
//! - **Legend**: norms, colorbar and categorical legend layouts

pub mod colormaps;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod legend;
pub mod logging;
pub mod recipe;

pub use colormaps::{
    ColorIndex, ColorInput, ColorModel, Extremes, HsvAdjust, ModelArray, Palette, PaletteRegistry,
    Rgba,
};
pub use config::Config;
pub use descriptor::{Descriptor, IndexSpec, SliceSpec};
pub use error::{HuecraftError, Result};
pub use factory::{cook, cook_palette, CookOptions, PaletteSource};
pub use legend::{Bounds, CategoryLegend, ColorbarLayout, Extend, LegendSpec, Spacing};
pub use logging::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_registration_stats,
    log_timed_operation,
};
pub use recipe::Recipe;
