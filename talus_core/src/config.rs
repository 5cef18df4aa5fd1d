// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout context configuration.

/// Configuration for a [`LayoutContext`](crate::LayoutContext).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Maximum number of live elements. Creating one more fails with
    /// [`LayoutError::CapacityExceeded`](crate::LayoutError::CapacityExceeded).
    pub max_elements: u32,
    /// Scratch words the frame arena may hand out at once during a pass.
    /// Exceeding it fails the pass with
    /// [`LayoutError::AllocationFailure`](crate::LayoutError::AllocationFailure).
    pub arena_budget: usize,
    /// Round flexible main-axis sizes down to whole pixels, giving the
    /// remainder to the last flexible child in document order.
    pub pixel_snapping: bool,
    /// Re-solve every cache hit without committing and assert the result
    /// matches what is stored.
    pub verify_cache_hits: bool,
}

impl LayoutConfig {
    /// About a million elements and a million arena words, pixel snapping
    /// on, hit verification in debug builds only.
    pub const DEFAULT: Self = Self {
        max_elements: 1 << 20,
        arena_budget: 1 << 20,
        pixel_snapping: true,
        verify_cache_hits: cfg!(debug_assertions),
    };

    /// No element or arena limits, no snapping.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_elements: u32::MAX - 1,
            arena_budget: usize::MAX,
            pixel_snapping: false,
            verify_cache_hits: false,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
