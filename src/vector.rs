// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-dimension vector math used for similarity ranking.

use crate::errors::{Result, SearchError};

/// Computes the dot product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32> {
    check_dimensions(a, b)?;
    Ok(dot_unchecked(a, b))
}

/// Euclidean norm. The zero vector has magnitude `0.0`.
pub fn magnitude(v: &[f32]) -> f32 {
    norm_wide(v) as f32
}

/// Computes the cosine similarity between two vectors.
///
/// Returns exactly `0.0` when either vector has zero magnitude. The result is
/// not clamped, so negative similarities keep their sign. Sums run in `f64`,
/// so any finite `f32` input yields a finite result.
///
/// # Errors
///
/// Returns [`SearchError::DimensionMismatch`] if the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    check_dimensions(a, b)?;

    let norm_a = norm_wide(a);
    let norm_b = norm_wide(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    // Adding 0.0 turns -0.0 into 0.0 so orthogonal pairs tie exactly.
    Ok((dot_wide(a, b) / norm_a / norm_b) as f32 + 0.0)
}

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(SearchError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

#[inline]
fn dot_unchecked(a: &[f32], b: &[f32]) -> f32 {
    dot_wide(a, b) as f32
}

#[inline]
fn dot_wide(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

// f32 squares overflow past ~1.8e19 and underflow below ~1e-23.
#[inline]
fn norm_wide(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}
