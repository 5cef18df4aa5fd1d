// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-feed channel constants.
//!
//! Layout invalidation itself uses the per-element `dirty_layout` bit and
//! version counters kept in the [`ElementStore`](crate::element::ElementStore)
//! arrays. What a renderer needs afterwards is a different question: which
//! rectangles actually moved or changed size during the last pass. That is
//! tracked with [`understory_dirty`], one channel per category.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`POSITION`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Geometry is stored container-relative, so when a
//!   container moves every descendant's absolute rectangle moves with it.
//!
//! - **Local-only**: [`SIZE`] is marked with the default policy. A resized
//!   container does not resize its children unless the solver says so, in
//!   which case they are marked individually.
//!
//! - **Structural**: [`TOPOLOGY`] is marked when elements are created,
//!   released, or when a child list changes. It triggers a paint-order
//!   rebuild during [`drain_changes`](crate::LayoutContext::drain_changes).

use understory_dirty::Channel;

/// Border-box size changed.
pub const SIZE: Channel = Channel::new(0);

/// Container-relative origin changed; absolute origins of all descendants
/// change with it.
pub const POSITION: Channel = Channel::new(1);

/// Tree topology changed; paint order must be rebuilt.
pub const TOPOLOGY: Channel = Channel::new(2);
