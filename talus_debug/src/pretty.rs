// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use talus_core::LayoutStats;
use talus_core::trace::{
    CacheLookupEvent, ContainerSolvedEvent, PassBeginEvent, SpinesEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    cache_lookups: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("cache_lookups", &self.cache_lookups)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            cache_lookups: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            cache_lookups: false,
        }
    }

    /// Also prints one line per cache lookup. Off by default.
    #[must_use]
    pub fn with_cache_lookups(mut self, enabled: bool) -> Self {
        self.cache_lookups = enabled;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] pass={} root={} viewport={}x{}",
            e.pass, e.root, e.viewport_width, e.viewport_height,
        );
    }

    fn on_spines(&mut self, e: &SpinesEvent) {
        let _ = writeln!(
            self.writer,
            "[spines] pass={} count={} work={} depth={}",
            e.pass, e.count, e.work_nodes, e.max_depth,
        );
    }

    fn on_container_solved(&mut self, e: &ContainerSolvedEvent) {
        let _ = writeln!(
            self.writer,
            "[solve] pass={} element={} children={} lines={} box={}x{} content={}x{}",
            e.pass,
            e.element,
            e.children,
            e.lines,
            e.width,
            e.height,
            e.content_width,
            e.content_height,
        );
    }

    fn on_pass_end(&mut self, s: &LayoutStats) {
        let _ = writeln!(
            self.writer,
            "[pass:end] pass={} visited={} solves={} hits={} misses={} measures={} arena={}",
            s.pass,
            s.visited,
            s.solver_runs,
            s.cache_hits,
            s.cache_misses,
            s.measure_calls,
            s.arena_high_water,
        );
    }

    fn on_cache_lookup(&mut self, e: &CacheLookupEvent) {
        if !self.cache_lookups {
            return;
        }
        let outcome = if e.hit { "hit" } else { "miss" };
        let _ = writeln!(
            self.writer,
            "[cache] pass={} element={} {outcome} version={}",
            e.pass, e.element, e.version,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use talus_core::trace::Tracer;
    use talus_core::{ElementKind, LayoutContext, LayoutStyle, Sizing};

    #[test]
    fn pretty_print_pass_begin() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_pass_begin(&PassBeginEvent {
            pass: 1,
            root: 0,
            viewport_width: 800.0,
            viewport_height: 600.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[pass:begin]"), "got: {output}");
        assert!(output.contains("viewport=800x600"), "got: {output}");
    }

    #[test]
    fn traced_pass_prints_each_stage() {
        let mut ctx = LayoutContext::default();
        let root = ctx.create_element(None, ElementKind::Container).unwrap();
        let child = ctx.create_element(Some(root), ElementKind::Container).unwrap();
        ctx.set_style(child, &LayoutStyle {
            width: Sizing::Fixed(10.0),
            ..LayoutStyle::DEFAULT
        })
        .unwrap();

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_cache_lookups(true);
        ctx.compute_layout_traced(root, Size::new(100.0, 100.0), &mut Tracer::new(&mut sink))
            .unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        for tag in ["[pass:begin]", "[spines]", "[solve]", "[cache]", "[pass:end]"] {
            assert!(output.contains(tag), "missing {tag} in: {output}");
        }
    }

    #[test]
    fn cache_lookups_are_quiet_by_default() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_cache_lookup(&CacheLookupEvent {
            pass: 1,
            element: 3,
            hit: true,
            version: 9,
        });
        assert!(sink.into_inner().is_empty());
    }
}
