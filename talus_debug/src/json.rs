// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded layout traces.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a pretty-printed JSON array, one object per event. Each
//! object carries an `"event"` name and a `"pass"` number so traces can be
//! grouped per pass by downstream tooling.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(event_to_json).collect();
    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::other)?;
    writeln!(writer)
}

fn event_to_json(recorded: RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::PassBegin(e) => json!({
            "event": "PassBegin",
            "pass": e.pass,
            "root": e.root,
            "viewport": [e.viewport_width, e.viewport_height],
        }),
        RecordedEvent::Spines(e) => json!({
            "event": "Spines",
            "pass": e.pass,
            "count": e.count,
            "work_nodes": e.work_nodes,
            "max_depth": e.max_depth,
        }),
        RecordedEvent::ContainerSolved(e) => json!({
            "event": "ContainerSolved",
            "pass": e.pass,
            "element": e.element,
            "children": e.children,
            "lines": e.lines,
            "size": [e.width, e.height],
            "content": [e.content_width, e.content_height],
        }),
        RecordedEvent::PassEnd(s) => json!({
            "event": "PassEnd",
            "pass": s.pass,
            "visited": s.visited,
            "solver_runs": s.solver_runs,
            "cache_hits": s.cache_hits,
            "cache_misses": s.cache_misses,
            "measure_calls": s.measure_calls,
            "spines": s.spines,
            "arena_high_water": s.arena_high_water,
        }),
        RecordedEvent::CacheLookup(e) => json!({
            "event": "CacheLookup",
            "pass": e.pass,
            "element": e.element,
            "hit": e.hit,
            "version": e.version,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use talus_core::LayoutStats;
    use talus_core::trace::{PassBeginEvent, TraceSink};

    #[test]
    fn export_writes_one_object_per_event() {
        let mut rec = RecorderSink::new();
        rec.on_pass_begin(&PassBeginEvent {
            pass: 2,
            root: 0,
            viewport_width: 640.0,
            viewport_height: 480.0,
        });
        rec.on_pass_end(&LayoutStats {
            pass: 2,
            visited: 5,
            solver_runs: 2,
            cache_hits: 3,
            cache_misses: 2,
            ..LayoutStats::default()
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let events = parsed.as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "PassBegin");
        assert_eq!(events[0]["viewport"][0], 640.0);
        assert_eq!(events[1]["event"], "PassEnd");
        assert_eq!(events[1]["cache_hits"], 3);
    }

    #[test]
    fn empty_recording_exports_an_empty_array() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
