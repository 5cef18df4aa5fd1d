// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree data model.
//!
//! An *element* is a node in the layout tree. Each element has:
//!
//! - An identity ([`ElementId`]): a generational handle that becomes stale
//!   when the element is released, so handles from a discarded frame are
//!   rejected instead of aliasing a new element.
//! - Topology: parent, first-child, last-child, and next-sibling indices
//!   forming an ordered forest. There are no owning pointers and no cycles.
//! - A kind tag ([`ElementKind`]) dispatched on by the solver.
//! - **Inputs** set by the caller: a [`LayoutStyle`](crate::style::LayoutStyle)
//!   and an optional [`ContentId`].
//! - **Computed geometry** written by the solver: container-relative origin,
//!   border-box size, and content size.
//!
//! Elements are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Every element carries a `dirty_layout` bit and a `version`. Changing an
//! element's inputs or its child list bumps its version and marks it and all
//! of its ancestors dirty. Layout walks only the [dirty spines](SpineList) and
//! clears the bits once the pass succeeds.
//!
//! Separately, geometry writes mark the renderer-feed channels in
//! [`dirty`](crate::dirty), surfaced through [`LayoutChanges`].

mod changes;
mod id;
mod spine;
mod store;
mod traverse;

pub use changes::LayoutChanges;
pub use id::{ContentId, ElementId, ElementKey, ElementKind, INVALID};
pub use spine::{DirtySpine, SpineList};
pub use store::ElementStore;
pub use traverse::Children;
