// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched clamp and distribution arithmetic over sibling arrays.
//!
//! Every routine walks its inputs in fixed-width chunks of [`LANES`] elements
//! so the compiler can keep each chunk in vector registers, then finishes the
//! remainder with scalar code. There is no tree awareness here; the solver
//! hands in flat per-child columns from the frame arena.

use crate::LayoutError;

/// Number of lanes processed per chunk.
pub const LANES: usize = 8;

/// Writes `raw[i]` clamped into `[min[i], max[i]]` to `out[i]`.
///
/// When a lower bound exceeds its upper bound the lower bound wins, matching
/// [`AxisConstraint::clamp`](crate::resolve::AxisConstraint::clamp).
///
/// Returns [`LayoutError::CapacityExceeded`] if `min`, `max`, or `out` is
/// shorter than `raw`. Nothing is written in that case.
pub fn clamp_batch(
    raw: &[f32],
    min: &[f32],
    max: &[f32],
    out: &mut [f32],
) -> Result<(), LayoutError> {
    let n = raw.len();
    let capacity = min.len().min(max.len()).min(out.len());
    if capacity < n {
        return Err(LayoutError::CapacityExceeded {
            capacity,
            required: n,
        });
    }
    let (min, max, out) = (&min[..n], &max[..n], &mut out[..n]);

    let mut raw_chunks = raw.chunks_exact(LANES);
    let mut min_chunks = min.chunks_exact(LANES);
    let mut max_chunks = max.chunks_exact(LANES);
    let mut out_chunks = out.chunks_exact_mut(LANES);
    for (((r, lo), hi), o) in (&mut raw_chunks)
        .zip(&mut min_chunks)
        .zip(&mut max_chunks)
        .zip(&mut out_chunks)
    {
        for lane in 0..LANES {
            o[lane] = r[lane].min(hi[lane]).max(lo[lane]);
        }
    }

    let tail = out_chunks.into_remainder();
    let lo = min_chunks.remainder();
    let hi = max_chunks.remainder();
    for (i, &r) in raw_chunks.remainder().iter().enumerate() {
        tail[i] = r.min(hi[i]).max(lo[i]);
    }
    Ok(())
}

/// Clamps `values` in place. Slices must have equal length.
pub fn clamp_in_place(values: &mut [f32], min: &[f32], max: &[f32]) {
    debug_assert!(
        min.len() == values.len() && max.len() == values.len(),
        "bound columns must match the value column"
    );
    let mut val_chunks = values.chunks_exact_mut(LANES);
    let mut min_chunks = min.chunks_exact(LANES);
    let mut max_chunks = max.chunks_exact(LANES);
    for ((v, lo), hi) in (&mut val_chunks)
        .zip(&mut min_chunks)
        .zip(&mut max_chunks)
    {
        for lane in 0..LANES {
            v[lane] = v[lane].min(hi[lane]).max(lo[lane]);
        }
    }
    let lo = min_chunks.remainder();
    let hi = max_chunks.remainder();
    for (i, v) in val_chunks.into_remainder().iter_mut().enumerate() {
        *v = v.min(hi[i]).max(lo[i]);
    }
}

/// Sets `out[i] = base[i] + factors[i] * per_unit` for every child.
///
/// This is one step of grow or shrink distribution: `per_unit` is the free
/// space divided by the sum of active factors, and inactive children carry a
/// factor of zero.
pub fn distribute_batch(base: &[f32], factors: &[f32], per_unit: f32, out: &mut [f32]) {
    debug_assert!(
        factors.len() == base.len() && out.len() == base.len(),
        "distribution columns must have equal length"
    );
    let mut base_chunks = base.chunks_exact(LANES);
    let mut factor_chunks = factors.chunks_exact(LANES);
    let mut out_chunks = out.chunks_exact_mut(LANES);
    for ((b, f), o) in (&mut base_chunks)
        .zip(&mut factor_chunks)
        .zip(&mut out_chunks)
    {
        for lane in 0..LANES {
            o[lane] = b[lane] + f[lane] * per_unit;
        }
    }
    let f = factor_chunks.remainder();
    let o = out_chunks.into_remainder();
    for (i, &b) in base_chunks.remainder().iter().enumerate() {
        o[i] = b + f[i] * per_unit;
    }
}

/// Sums `values` lane-wise.
#[must_use]
pub fn sum_batch(values: &[f32]) -> f32 {
    let mut acc = [0.0_f32; LANES];
    let mut chunks = values.chunks_exact(LANES);
    for c in &mut chunks {
        for lane in 0..LANES {
            acc[lane] += c[lane];
        }
    }
    let mut total = 0.0;
    for a in acc {
        total += a;
    }
    for &v in chunks.remainder() {
        total += v;
    }
    total
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn clamp_matches_scalar_across_remainder() {
        // 11 values: one full chunk plus a 3-element tail.
        let raw: Vec<f32> = (0..11).map(|i| i as f32 * 10.0).collect();
        let min = vec![15.0; 11];
        let max = vec![75.0; 11];
        let mut out = vec![0.0; 11];
        clamp_batch(&raw, &min, &max, &mut out).unwrap();
        for (i, &v) in out.iter().enumerate() {
            let expected = raw[i].min(75.0).max(15.0);
            assert_eq!(v, expected, "lane {i}");
        }
    }

    #[test]
    fn clamp_min_wins_on_conflict() {
        let mut out = [0.0; 1];
        clamp_batch(&[5.0], &[30.0], &[10.0], &mut out).unwrap();
        assert_eq!(out[0], 30.0);
    }

    #[test]
    fn short_output_is_an_error_not_a_truncation() {
        let raw = [1.0; 9];
        let bounds = [0.0; 9];
        let mut out = [-1.0; 4];
        let err = clamp_batch(&raw, &bounds, &bounds, &mut out).unwrap_err();
        assert_eq!(
            err,
            LayoutError::CapacityExceeded {
                capacity: 4,
                required: 9
            }
        );
        assert!(out.iter().all(|&v| v == -1.0), "nothing may be written");
    }

    #[test]
    fn clamp_in_place_applies_bounds() {
        let mut values = [1.0, 50.0, 500.0];
        clamp_in_place(&mut values, &[10.0, 10.0, 10.0], &[100.0, 100.0, 100.0]);
        assert_eq!(values, [10.0, 50.0, 100.0]);
    }

    #[test]
    fn distribute_adds_weighted_share() {
        let base = [0.0, 10.0, 20.0];
        let factors = [1.0, 0.0, 2.0];
        let mut out = [0.0; 3];
        distribute_batch(&base, &factors, 50.0, &mut out);
        assert_eq!(out, [50.0, 10.0, 120.0]);
    }

    #[test]
    fn sum_covers_full_chunks_and_tail() {
        let values: Vec<f32> = (1..=20).map(|i| i as f32).collect();
        assert_eq!(sum_batch(&values), 210.0);
        assert_eq!(sum_batch(&[]), 0.0);
    }
}
