//! Common test utilities for huecraft.
//!
//! This module provides shared fixtures and assertions for integration tests.

#![allow(dead_code)]

pub mod assertions;

use huecraft::{Palette, PaletteRegistry};

/// A registry with the built-in palettes, private to one test
pub fn registry() -> PaletteRegistry {
    PaletteRegistry::with_builtins()
}

/// Resolve a descriptor against a fresh registry
pub fn palette(descriptor: &str) -> Palette {
    Palette::from_name_in(descriptor, &registry())
        .unwrap_or_else(|err| panic!("failed to build '{descriptor}': {err}"))
}
