// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use talus_core::LayoutStats;
use talus_core::trace::{
    CacheLookupEvent, ContainerSolvedEvent, PassBeginEvent, SpinesEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_SPINES: u8 = 2;
const TAG_CONTAINER_SOLVED: u8 = 3;
const TAG_PASS_END: u8 = 4;
const TAG_CACHE_LOOKUP: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.pass);
        self.write_u32(e.root);
        self.write_f32(e.viewport_width);
        self.write_f32(e.viewport_height);
    }

    fn on_spines(&mut self, e: &SpinesEvent) {
        self.write_u8(TAG_SPINES);
        self.write_u64(e.pass);
        self.write_u32(e.count);
        self.write_u32(e.work_nodes);
        self.write_u32(e.max_depth);
    }

    fn on_container_solved(&mut self, e: &ContainerSolvedEvent) {
        self.write_u8(TAG_CONTAINER_SOLVED);
        self.write_u64(e.pass);
        self.write_u32(e.element);
        self.write_u32(e.children);
        self.write_u32(e.lines);
        self.write_f32(e.width);
        self.write_f32(e.height);
        self.write_f32(e.content_width);
        self.write_f32(e.content_height);
    }

    fn on_pass_end(&mut self, s: &LayoutStats) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(s.pass);
        self.write_u32(s.visited);
        self.write_u32(s.solver_runs);
        self.write_u32(s.cache_hits);
        self.write_u32(s.cache_misses);
        self.write_u32(s.measure_calls);
        self.write_u32(s.spines);
        self.write_u64(s.arena_high_water as u64);
    }

    fn on_cache_lookup(&mut self, e: &CacheLookupEvent) {
        self.write_u8(TAG_CACHE_LOOKUP);
        self.write_u64(e.pass);
        self.write_u32(e.element);
        self.write_u8(u8::from(e.hit));
        self.write_u64(e.version);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`SpinesEvent`].
    Spines(SpinesEvent),
    /// A [`ContainerSolvedEvent`].
    ContainerSolved(ContainerSolvedEvent),
    /// The [`LayoutStats`] of a completed pass.
    PassEnd(LayoutStats),
    /// A [`CacheLookupEvent`].
    CacheLookup(CacheLookupEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
///
/// Stops at the first unknown tag or truncated record.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f32(&mut self) -> Option<f32> {
        self.take().map(f32::from_le_bytes)
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            pass: self.read_u64()?,
            root: self.read_u32()?,
            viewport_width: self.read_f32()?,
            viewport_height: self.read_f32()?,
        }))
    }

    fn decode_spines(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Spines(SpinesEvent {
            pass: self.read_u64()?,
            count: self.read_u32()?,
            work_nodes: self.read_u32()?,
            max_depth: self.read_u32()?,
        }))
    }

    fn decode_container_solved(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ContainerSolved(ContainerSolvedEvent {
            pass: self.read_u64()?,
            element: self.read_u32()?,
            children: self.read_u32()?,
            lines: self.read_u32()?,
            width: self.read_f32()?,
            height: self.read_f32()?,
            content_width: self.read_f32()?,
            content_height: self.read_f32()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(LayoutStats {
            pass: self.read_u64()?,
            visited: self.read_u32()?,
            solver_runs: self.read_u32()?,
            cache_hits: self.read_u32()?,
            cache_misses: self.read_u32()?,
            measure_calls: self.read_u32()?,
            spines: self.read_u32()?,
            arena_high_water: usize::try_from(self.read_u64()?).ok()?,
        }))
    }

    fn decode_cache_lookup(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CacheLookup(CacheLookupEvent {
            pass: self.read_u64()?,
            element: self.read_u32()?,
            hit: self.read_u8()? != 0,
            version: self.read_u64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_SPINES => self.decode_spines(),
            TAG_CONTAINER_SOLVED => self.decode_container_solved(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_CACHE_LOOKUP => self.decode_cache_lookup(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use talus_core::trace::Tracer;
    use talus_core::{ElementKind, LayoutContext, LayoutStyle, Sizing};

    fn sample_solved() -> ContainerSolvedEvent {
        ContainerSolvedEvent {
            pass: 4,
            element: 12,
            children: 3,
            lines: 1,
            width: 320.0,
            height: 48.5,
            content_width: 300.0,
            content_height: 48.5,
        }
    }

    #[test]
    fn container_solved_survives_recording() {
        let mut rec = RecorderSink::new();
        let orig = sample_solved();
        rec.on_container_solved(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::ContainerSolved(e) => {
                assert_eq!(e.element, orig.element);
                assert_eq!(e.children, orig.children);
                assert_eq!(e.height, orig.height);
                assert_eq!(e.content_width, orig.content_width);
            }
            other => panic!("expected ContainerSolved, got {other:?}"),
        }
    }

    #[test]
    fn recorded_pass_decodes_in_order() {
        let mut ctx = LayoutContext::default();
        let root = ctx.create_element(None, ElementKind::Container).unwrap();
        for _ in 0..3 {
            let child = ctx.create_element(Some(root), ElementKind::Container).unwrap();
            ctx.set_style(child, &LayoutStyle {
                width: Sizing::Grow(1.0),
                ..LayoutStyle::DEFAULT
            })
            .unwrap();
        }

        let mut rec = RecorderSink::new();
        let stats = ctx
            .compute_layout_traced(root, Size::new(90.0, 10.0), &mut Tracer::new(&mut rec))
            .unwrap();
        let events: Vec<_> = decode(rec.as_bytes()).collect();

        assert!(matches!(events.first(), Some(RecordedEvent::PassBegin(_))));
        assert!(matches!(events.get(1), Some(RecordedEvent::Spines(_))));
        match events.last() {
            Some(RecordedEvent::PassEnd(s)) => assert_eq!(*s, stats),
            other => panic!("expected PassEnd, got {other:?}"),
        }
        let lookups = events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::CacheLookup(_)))
            .count();
        assert_eq!(lookups, 4);
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_container_solved(&sample_solved());
        rec.on_container_solved(&sample_solved());
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
