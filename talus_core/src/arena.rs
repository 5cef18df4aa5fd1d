// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-scoped scratch memory.
//!
//! [`FrameArena`] is a bump allocator over two typed pools, one of `f32` for
//! per-child size columns and one of `u32` for child index lists and wrap-line
//! boundaries. Nothing is freed individually: the solver takes a
//! [`mark`](FrameArena::mark) before each container, allocates, and
//! [`rewind`](FrameArena::rewind)s once the result is committed. The whole
//! arena is [`reset`](FrameArena::reset) at the start of every layout pass.
//!
//! The budget is counted in words across both pools. Running out is reported
//! as [`LayoutError::AllocationFailure`]; allocations never truncate.

use alloc::vec::Vec;

use crate::LayoutError;

/// A saved allocation position, returned by [`FrameArena::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaMark {
    f32_top: usize,
    u32_top: usize,
}

/// Bump allocator for per-pass solver scratch.
#[derive(Debug)]
pub struct FrameArena {
    f32_pool: Vec<f32>,
    u32_pool: Vec<u32>,
    f32_top: usize,
    u32_top: usize,
    budget: usize,
    high_water: usize,
}

impl FrameArena {
    /// Creates an arena that hands out at most `budget` words per pass.
    #[must_use]
    pub fn new(budget: usize) -> Self {
        Self {
            f32_pool: Vec::new(),
            u32_pool: Vec::new(),
            f32_top: 0,
            u32_top: 0,
            budget,
            high_water: 0,
        }
    }

    /// Releases every allocation. Pool capacity is kept for the next pass.
    pub fn reset(&mut self) {
        self.f32_top = 0;
        self.u32_top = 0;
    }

    /// Words currently allocated.
    #[must_use]
    pub fn used(&self) -> usize {
        self.f32_top + self.u32_top
    }

    /// Words still available under the budget.
    #[must_use]
    pub fn available(&self) -> usize {
        self.budget.saturating_sub(self.used())
    }

    /// The budget in words.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Changes the budget. Takes effect for subsequent allocations.
    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
    }

    /// The largest [`used`](Self::used) value seen since creation.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Saves the current allocation position.
    #[must_use]
    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            f32_top: self.f32_top,
            u32_top: self.u32_top,
        }
    }

    /// Releases everything allocated since `mark` was taken.
    pub fn rewind(&mut self, mark: ArenaMark) {
        debug_assert!(
            mark.f32_top <= self.f32_top && mark.u32_top <= self.u32_top,
            "rewinding past the current top"
        );
        self.f32_top = mark.f32_top;
        self.u32_top = mark.u32_top;
    }

    /// Allocates a zeroed `f32` slice of length `len`.
    pub fn alloc_f32(&mut self, len: usize) -> Result<&mut [f32], LayoutError> {
        self.reserve(len)?;
        let start = self.f32_top;
        self.f32_top += len;
        Ok(take_zeroed(&mut self.f32_pool, start, len, 0.0))
    }

    /// Allocates a zeroed `u32` slice of length `len`.
    pub fn alloc_u32(&mut self, len: usize) -> Result<&mut [u32], LayoutError> {
        self.reserve(len)?;
        let start = self.u32_top;
        self.u32_top += len;
        Ok(take_zeroed(&mut self.u32_pool, start, len, 0))
    }

    /// Allocates one zeroed slice from each pool in a single step, so both can
    /// be held at the same time.
    pub fn alloc_split(
        &mut self,
        u32_len: usize,
        f32_len: usize,
    ) -> Result<(&mut [u32], &mut [f32]), LayoutError> {
        self.reserve(u32_len + f32_len)?;
        let u_start = self.u32_top;
        let f_start = self.f32_top;
        self.u32_top += u32_len;
        self.f32_top += f32_len;
        let ints = take_zeroed(&mut self.u32_pool, u_start, u32_len, 0);
        let floats = take_zeroed(&mut self.f32_pool, f_start, f32_len, 0.0);
        Ok((ints, floats))
    }

    fn reserve(&mut self, words: usize) -> Result<(), LayoutError> {
        let available = self.available();
        if words > available {
            return Err(LayoutError::AllocationFailure {
                requested: words,
                available,
            });
        }
        self.high_water = self.high_water.max(self.used() + words);
        Ok(())
    }
}

fn take_zeroed<T: Copy>(pool: &mut Vec<T>, start: usize, len: usize, zero: T) -> &mut [T] {
    let end = start + len;
    if pool.len() < end {
        pool.resize(end, zero);
    }
    let slice = &mut pool[start..end];
    slice.fill(zero);
    slice
}

/// Splits `buf` into `K` consecutive columns of length `n`.
///
/// `buf` must hold at least `K * n` elements.
pub(crate) fn columns<const K: usize>(buf: &mut [f32], n: usize) -> [&mut [f32]; K] {
    let mut rest = buf;
    core::array::from_fn(|_| {
        let (head, tail) = core::mem::take(&mut rest).split_at_mut(n);
        rest = tail;
        head
    })
}
