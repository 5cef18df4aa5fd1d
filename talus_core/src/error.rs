// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by construction, mutation, and layout.

use core::fmt;

use crate::element::{ElementId, ElementKey};

/// Errors surfaced by [`LayoutContext`](crate::LayoutContext) operations.
///
/// Construction and mutation errors are reported synchronously by the call
/// that caused them. Only [`AllocationFailure`](Self::AllocationFailure) can
/// be produced by [`compute_layout`](crate::LayoutContext::compute_layout)
/// itself (besides a stale or non-root handle).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The handle belongs to a slot that has since been released and possibly
    /// reused by a later frame.
    StaleReference {
        /// The offending handle.
        id: ElementId,
    },
    /// The frame arena ran out of budget while laying out the current pass.
    AllocationFailure {
        /// Words requested by the failing allocation.
        requested: usize,
        /// Words still available in the arena at the time.
        available: usize,
    },
    /// A bounded buffer or the element store is too small for the request.
    CapacityExceeded {
        /// The fixed capacity that was hit.
        capacity: usize,
        /// The capacity that would have been required.
        required: usize,
    },
    /// Begin/end element calls are not balanced.
    UnbalancedScope {
        /// Number of element scopes still open.
        open: usize,
    },
    /// The parent cannot hold children (text and image elements are leaves).
    InvalidParent {
        /// The parent handle that was rejected.
        id: ElementId,
    },
    /// Layout was requested for an element that has a parent.
    NotARoot {
        /// The rejected handle.
        id: ElementId,
    },
    /// The same element key was declared twice within one frame.
    DuplicateKey {
        /// The repeated key.
        key: ElementKey,
    },
    /// An immediate-mode frame is still open.
    FrameInProgress,
    /// An immediate-mode call was made outside of `begin_frame`/`end_frame`.
    NoFrameOpen,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleReference { id } => write!(f, "stale element reference {id:?}"),
            Self::AllocationFailure {
                requested,
                available,
            } => write!(
                f,
                "frame arena exhausted: requested {requested} words, {available} available"
            ),
            Self::CapacityExceeded { capacity, required } => {
                write!(f, "capacity exceeded: need {required}, capacity is {capacity}")
            }
            Self::UnbalancedScope { open } => {
                write!(f, "unbalanced element scopes ({open} open)")
            }
            Self::InvalidParent { id } => write!(f, "{id:?} cannot have children"),
            Self::NotARoot { id } => write!(f, "{id:?} is not a tree root"),
            Self::DuplicateKey { key } => write!(f, "{key:?} declared twice in one frame"),
            Self::FrameInProgress => f.write_str("an immediate-mode frame is still open"),
            Self::NoFrameOpen => f.write_str("no immediate-mode frame is open"),
        }
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_mentions_counts() {
        let err = LayoutError::AllocationFailure {
            requested: 64,
            available: 8,
        };
        let text = err.to_string();
        assert!(text.contains("64"), "got: {text}");
        assert!(text.contains('8'), "got: {text}");
    }

    #[test]
    fn display_unbalanced() {
        let text = LayoutError::UnbalancedScope { open: 2 }.to_string();
        assert_eq!(text, "unbalanced element scopes (2 open)");
    }
}
