// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity, content, and kind tags.

use core::fmt;

/// Sentinel value indicating "no element" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an element in an [`ElementStore`](super::ElementStore).
///
/// Contains both a slot index and a generation counter so that handles from a
/// discarded frame are rejected with
/// [`LayoutError::StaleReference`](crate::LayoutError::StaleReference)
/// after the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ElementId {
    /// Returns the raw slot index.
    ///
    /// Raw indices are what [`LayoutChanges`](super::LayoutChanges) and
    /// [`paint_order`](crate::LayoutContext::paint_order) report.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}

/// A stable caller-chosen tag that keeps an element's identity across
/// immediate-mode frames.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey(pub u64);

impl ElementKey {
    /// Derives a key from a string label (FNV-1a).
    #[must_use]
    pub const fn from_label(label: &str) -> Self {
        let bytes = label.as_bytes();
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(0x0100_0000_01b3);
            i += 1;
        }
        Self(hash)
    }

    /// Derives a key for the `index`-th item of a keyed list.
    #[must_use]
    pub const fn indexed(self, index: u32) -> Self {
        let mut hash = self.0 ^ (index as u64).wrapping_add(0x9e37_79b9_7f4a_7c15);
        hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        Self(hash ^ (hash >> 31))
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementKey({:#018x})", self.0)
    }
}

/// An opaque reference to caller-owned content (a string, an image).
///
/// The layout core never looks inside; it only hands the id back to the
/// [`ContentMeasure`](crate::ContentMeasure) collaborator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u32);

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

/// The kind tag stored per element.
///
/// Dispatch on the kind happens inside the solver; there are no per-element
/// trait objects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A flex container. May have children.
    #[default]
    Container,
    /// A text leaf sized by measuring its content.
    Text,
    /// An image leaf sized by its reported intrinsic size.
    Image,
}

impl ElementKind {
    /// Returns whether elements of this kind are content leaves that reject
    /// children.
    #[inline]
    #[must_use]
    pub const fn is_content_leaf(self) -> bool {
        matches!(self, Self::Text | Self::Image)
    }
}
