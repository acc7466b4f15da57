//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point colors.

#![allow(dead_code)]

use huecraft::Rgba;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two slices are approximately element-wise equal.
///
/// # Panics
///
/// Panics if the slices have different lengths or if any element-wise comparison fails.
pub fn assert_array_approx_eq(actual: &[f64], expected: &[f64], epsilon: Option<f64>) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Arrays have different lengths: actual = {}, expected = {}",
        actual.len(),
        expected.len()
    );

    let eps = epsilon.unwrap_or(DEFAULT_EPSILON);
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= eps,
            "Arrays differ at index {}: actual = {}, expected = {}, diff = {}, epsilon = {}",
            i,
            a,
            e,
            diff,
            eps
        );
    }
}

/// Assert that two colors match channel by channel.
pub fn assert_color_approx_eq(actual: Rgba, expected: Rgba) {
    assert_array_approx_eq(&actual, &expected, None);
}

/// Assert that every channel of every sample lies in `[0, 1]`.
pub fn assert_samples_in_unit_range(samples: &[Rgba]) {
    for (i, sample) in samples.iter().enumerate() {
        assert!(
            sample.iter().all(|c| (0.0..=1.0).contains(c)),
            "Sample {} out of range: {:?}",
            i,
            sample
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_color_approx_eq() {
        assert_color_approx_eq([0.1, 0.2, 0.3, 1.0], [0.1, 0.2, 0.3 + 1e-12, 1.0]);
    }
}
