// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for talus diagnostics.
//!
//! This crate provides [`TraceSink`](talus_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes recorded bytes as a JSON array of events.
//!
//! [`tree::dump_tree`] renders the computed geometry of a tree as text.

pub mod json;
pub mod pretty;
pub mod recorder;
pub mod tree;
