// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental flexbox layout over a struct-of-arrays element tree.
//!
//! `talus_core` computes box geometry for a tree of elements under a
//! single-axis flexbox model. It is `no_std` compatible (with `alloc`) and
//! keeps every per-element attribute in a parallel array indexed by
//! generational handles.
//!
//! # Architecture
//!
//! A pass only touches what changed since the previous one:
//!
//! ```text
//!   set_style / set_content / frames
//!       │  (version bump, dirty bit up to the root)
//!       ▼
//!   SpineList::collect ──► compute_layout ──► Walk
//!                                              │
//!               ┌──────────────────────────────┤
//!               ▼                              ▼
//!   LayoutCache::lookup (hit: skip)   solve_container ──► commit
//!                                              │
//!                                              ▼
//!   LayoutChanges (resized / moved / topology) ──► renderer
//! ```
//!
//! **[`element`]**: struct-of-arrays element tree with generational handles,
//! versions, and dirty bits.
//!
//! **[`style`]** and **[`resolve`]**: declarative per-element style and its
//! resolution against a parent content box into numeric constraints.
//!
//! **[`simd`]**: batched clamping and distribution kernels used by the
//! solver.
//!
//! **[`cache`]**: per-element memo of the last layout output, keyed on the
//! input box and subtree version.
//!
//! **[`arena`]**: per-pass bump allocator for solver scratch memory.
//!
//! **[`dirty`]**: renderer-feed channels via `understory_dirty`. SIZE is
//! local, POSITION propagates to descendants, TOPOLOGY triggers a paint
//! order rebuild.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! pass instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! Trees are built either in retained mode
//! ([`LayoutContext::create_element`]) or in immediate mode
//! ([`LayoutContext::begin_frame`], [`LayoutContext::begin_element`],
//! [`LayoutContext::end_element`], [`LayoutContext::end_frame`]).
//!
//! # Example
//!
//! ```
//! use kurbo::Size;
//! use talus_core::{ElementKind, LayoutContext, LayoutStyle, Sizing};
//!
//! let mut ctx = LayoutContext::default();
//! let root = ctx.create_element(None, ElementKind::Container).unwrap();
//! ctx.set_style(root, &LayoutStyle {
//!     width: Sizing::Grow(1.0),
//!     height: Sizing::Grow(1.0),
//!     ..LayoutStyle::DEFAULT
//! })
//! .unwrap();
//! let child = ctx.create_element(Some(root), ElementKind::Container).unwrap();
//! ctx.set_style(child, &LayoutStyle {
//!     width: Sizing::Grow(1.0),
//!     height: Sizing::Fixed(20.0),
//!     ..LayoutStyle::DEFAULT
//! })
//! .unwrap();
//!
//! ctx.compute_layout(root, Size::new(300.0, 200.0)).unwrap();
//! assert_eq!(ctx.rect(child).unwrap().width(), 300.0);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   cache lookup events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod arena;
pub mod cache;
pub mod dirty;
pub mod element;
pub mod resolve;
pub mod simd;
pub mod style;
pub mod trace;

mod builder;
mod config;
mod context;
mod engine;
mod error;
mod measure;
mod query;
mod solver;

pub use arena::{ArenaMark, FrameArena};
pub use cache::{CacheEntry, Geometry, LayoutCache};
pub use config::LayoutConfig;
pub use context::LayoutContext;
pub use element::{ContentId, ElementId, ElementKey, ElementKind, LayoutChanges};
pub use engine::LayoutStats;
pub use error::LayoutError;
pub use measure::{ContentMeasure, NoContent};
pub use style::{Align, Axis, Bounds, Direction, Edges, Justify, LayoutStyle, Sizing, Wrap};
