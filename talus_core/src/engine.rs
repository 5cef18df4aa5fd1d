// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass: spineless traversal over the dirty spines.
//!
//! [`LayoutContext::compute_layout`] is the single entry point. One pass:
//!
//! 1. Resets the frame arena and collects the dirty spines under the root.
//! 2. Sizes the root against the viewport.
//! 3. Lays out the root, then walks every spine from its work depth down,
//!    laying out each element not yet visited in this pass.
//!
//! Laying out an element first consults the [`LayoutCache`]: a hit keyed on
//! the element's border-box size and subtree version means the geometry
//! already in the store is current. On a miss the solver runs for its
//! children, and every *clean* child handed a size it was not cached at is
//! laid out recursively. Dirty children are left to their own spines.
//!
//! Clean subtrees off the spines are never visited. Their geometry is
//! container-relative, so moving a clean subtree only moves its root.
//!
//! Dirty flags are cleared only when a pass succeeds. A failed pass (arena
//! exhaustion) leaves every flag set, so the next pass redoes the work.
//!
//! [`LayoutCache`]: crate::LayoutCache

use alloc::vec::Vec;

use kurbo::Size;

use crate::LayoutContext;
use crate::LayoutError;
use crate::arena::FrameArena;
use crate::cache::{CacheEntry, Geometry, LayoutCache};
use crate::config::LayoutConfig;
use crate::element::{ElementId, ElementStore, INVALID, SpineList};
use crate::measure::{MeasureCx, narrow};
use crate::resolve::{AxisConstraint, BaseSize, ContentBox, resolve};
use crate::solver::{solve_container, to_u32};
use crate::style::Axis;
use crate::trace::{ContainerSolvedEvent, PassBeginEvent, SpinesEvent, Tracer};

/// Counters for one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Pass counter.
    pub pass: u64,
    /// Elements visited (cache lookups).
    pub visited: u32,
    /// Containers whose children were solved.
    pub solver_runs: u32,
    /// Lookups answered by the cache.
    pub cache_hits: u32,
    /// Lookups that missed.
    pub cache_misses: u32,
    /// Calls into the content measurement collaborator.
    pub measure_calls: u32,
    /// Dirty spines walked.
    pub spines: u32,
    /// Peak arena usage in words, across all passes so far.
    pub arena_high_water: usize,
}

impl LayoutContext {
    /// Lays out the tree rooted at `root` inside a viewport of `viewport`.
    ///
    /// Only elements on dirty spines (and clean children whose allotted size
    /// changed) are visited. Returns the pass counters.
    ///
    /// `root` must have no parent; use [`root_of`](Self::root_of) to find it.
    pub fn compute_layout(
        &mut self,
        root: ElementId,
        viewport: Size,
    ) -> Result<LayoutStats, LayoutError> {
        self.compute_layout_traced(root, viewport, &mut Tracer::none())
    }

    /// Like [`compute_layout`](Self::compute_layout), reporting progress to
    /// `tracer`.
    pub fn compute_layout_traced(
        &mut self,
        root: ElementId,
        viewport: Size,
        tracer: &mut Tracer<'_>,
    ) -> Result<LayoutStats, LayoutError> {
        if self.frame.open {
            return Err(LayoutError::FrameInProgress);
        }
        self.store.validate(root)?;
        if self.store.parent_at(root.idx) != INVALID {
            return Err(LayoutError::NotARoot { id: root });
        }
        let r = root.idx;

        self.pass += 1;
        let pass = self.pass;
        self.arena.reset();
        self.visited.clear();

        let viewport_width = narrow(viewport.width);
        let viewport_height = narrow(viewport.height);
        tracer.pass_begin(&PassBeginEvent {
            pass,
            root: r,
            viewport_width,
            viewport_height,
        });

        let mut spines = core::mem::take(&mut self.spines);
        self.store.collect_dirty_spines(r, &mut spines);
        tracer.spines(&SpinesEvent {
            pass,
            count: to_u32(spines.len()),
            work_nodes: to_u32(spines.work_nodes()),
            max_depth: to_u32(spines.max_depth()),
        });

        let mut stats = LayoutStats {
            pass,
            spines: to_u32(spines.len()),
            ..LayoutStats::default()
        };
        let mut walk = Walk {
            store: &mut self.store,
            cache: &mut self.cache,
            arena: &mut self.arena,
            config: self.config,
            cx: MeasureCx {
                measure: &*self.measure,
                pass,
                calls: 0,
            },
            visited: &mut self.visited,
            stats: &mut stats,
            tracer,
        };
        let result = walk.run(r, ContentBox::new(viewport_width, viewport_height), &spines);
        let measure_calls = walk.cx.calls;
        self.spines = spines;
        result?;

        self.store.finish_pass(&self.visited, pass);
        self.store.refresh_paint_order();
        stats.measure_calls = measure_calls;
        stats.arena_high_water = self.arena.high_water();
        tracer.pass_end(&stats);
        Ok(stats)
    }
}

/// Split borrows of a context for the duration of one pass.
struct Walk<'a, 't> {
    store: &'a mut ElementStore,
    cache: &'a mut LayoutCache,
    arena: &'a mut FrameArena,
    config: LayoutConfig,
    cx: MeasureCx<'a>,
    visited: &'a mut Vec<u32>,
    stats: &'a mut LayoutStats,
    tracer: &'a mut Tracer<'t>,
}

impl Walk<'_, '_> {
    fn run(
        &mut self,
        root: u32,
        viewport: ContentBox,
        spines: &SpineList,
    ) -> Result<(), LayoutError> {
        self.size_root(root, viewport);
        self.layout_element(root)?;
        let pass = self.cx.pass;
        for spine in spines.iter() {
            for &idx in spine.work() {
                if self.store.layout_stamp[idx as usize] != pass {
                    self.layout_element(idx)?;
                }
            }
        }
        Ok(())
    }

    /// Sizes the root against the viewport and places it at its margin.
    fn size_root(&mut self, root: u32, viewport: ContentBox) {
        let i = root as usize;
        let style = self.store.style[i];
        let rc = resolve(&style, viewport);
        let needs_content =
            rc.width.base == BaseSize::Content || rc.height.base == BaseSize::Content;
        let (iw, ih) = if needs_content {
            self.store.intrinsic_size(root, &mut self.cx)
        } else {
            (0.0, 0.0)
        };
        let width = root_extent(&rc.width, viewport.width, iw);
        let height = root_extent(&rc.height, viewport.height, ih);
        self.store
            .write_geometry(root, style.margin.left, style.margin.top, width, height);
    }

    /// Lays out one element whose border box is already in the store.
    fn layout_element(&mut self, idx: u32) -> Result<(), LayoutError> {
        let i = idx as usize;
        let pass = self.cx.pass;
        self.stats.visited += 1;
        self.store.layout_stamp[i] = pass;
        self.visited.push(idx);

        let version = self.store.subtree_version(idx, pass);
        let generation = self.store.generation[i];
        let width = self.store.width[i];
        let height = self.store.height[i];
        let cached = self.cache.lookup(idx, generation, width, height, version);

        #[cfg(feature = "trace-rich")]
        self.tracer.cache_lookup(&crate::trace::CacheLookupEvent {
            pass,
            element: idx,
            hit: cached.is_some(),
            version,
        });

        if let Some(out) = cached {
            self.stats.cache_hits += 1;
            if self.config.verify_cache_hits {
                self.verify_hit(idx, &out)?;
            }
            return Ok(());
        }
        self.stats.cache_misses += 1;

        let (content_width, content_height) = if self.store.first_child[i] == INVALID {
            self.leaf_content(idx)
        } else {
            let content = self.solve_children(idx)?;
            // Clean children handed a new size still need their own subtree
            // laid out; dirty ones are reached by their spines.
            let mut child = self.store.first_child[i];
            while child != INVALID {
                let c = child as usize;
                if !self.store.dirty_layout[c]
                    && self.store.layout_stamp[c] != pass
                    && !self.cache.has_input(
                        child,
                        self.store.generation[c],
                        self.store.width[c],
                        self.store.height[c],
                    )
                {
                    self.layout_element(child)?;
                }
                child = self.store.next_sibling[c];
            }
            content
        };

        self.store.content_width[i] = content_width;
        self.store.content_height[i] = content_height;
        self.cache.store(
            idx,
            CacheEntry::new(
                Geometry {
                    width,
                    height,
                    content_width,
                    content_height,
                },
                version,
                generation,
            ),
        );
        Ok(())
    }

    /// Content size of an element without children.
    fn leaf_content(&mut self, idx: u32) -> (f32, f32) {
        let i = idx as usize;
        if self.store.kind[i].is_content_leaf() {
            self.store.intrinsic_size(idx, &mut self.cx)
        } else {
            let padding = self.store.style[i].padding;
            (padding.sum(Axis::Horizontal), padding.sum(Axis::Vertical))
        }
    }

    /// Runs the solver for the children of `idx` and commits the result.
    fn solve_children(&mut self, idx: u32) -> Result<(f32, f32), LayoutError> {
        let mark = self.arena.mark();
        let solution = solve_container(
            self.store,
            self.arena,
            idx,
            self.config.pixel_snapping,
            &mut self.cx,
        )?;
        solution.commit(self.store);
        let event = ContainerSolvedEvent {
            pass: self.cx.pass,
            element: idx,
            children: to_u32(solution.len()),
            lines: solution.lines,
            width: self.store.width[idx as usize],
            height: self.store.height[idx as usize],
            content_width: solution.content_width,
            content_height: solution.content_height,
        };
        self.arena.rewind(mark);
        self.stats.solver_runs += 1;
        self.tracer.container_solved(&event);
        Ok((event.content_width, event.content_height))
    }

    /// Re-solves a cache hit without committing and asserts it matches, then
    /// descends into every clean child the hit would skip.
    ///
    /// Dirty children are checked when their own spine reaches them.
    fn verify_hit(&mut self, idx: u32, cached: &Geometry) -> Result<(), LayoutError> {
        let i = idx as usize;
        let consistent = if self.store.first_child[i] == INVALID {
            let (cw, ch) = self.leaf_content(idx);
            cw.to_bits() == cached.content_width.to_bits()
                && ch.to_bits() == cached.content_height.to_bits()
        } else {
            let mark = self.arena.mark();
            let solution = solve_container(
                self.store,
                self.arena,
                idx,
                self.config.pixel_snapping,
                &mut self.cx,
            )?;
            let same = solution.matches_store(self.store)
                && solution.content_width.to_bits() == cached.content_width.to_bits()
                && solution.content_height.to_bits() == cached.content_height.to_bits();
            self.arena.rewind(mark);
            same
        };
        assert!(
            consistent,
            "cached layout of element {idx} differs from a fresh solve"
        );

        let mut child = self.store.first_child[i];
        while child != INVALID {
            let c = child as usize;
            if !self.store.dirty_layout[c] {
                let version = self.store.subtree_version(child, self.cx.pass);
                let entry = self.cache.lookup(
                    child,
                    self.store.generation[c],
                    self.store.width[c],
                    self.store.height[c],
                    version,
                );
                if let Some(out) = entry {
                    self.verify_hit(child, &out)?;
                }
            }
            child = self.store.next_sibling[c];
        }
        Ok(())
    }
}

/// Root extent along one axis: definite sizes as given, `Grow` fills a
/// finite viewport, everything else takes the intrinsic size.
fn root_extent(c: &AxisConstraint, viewport: f32, intrinsic: f32) -> f32 {
    match c.base {
        BaseSize::Definite(v) => c.clamp(v),
        BaseSize::Content if c.grow > 0.0 && viewport.is_finite() => {
            c.clamp((viewport - c.margin).max(0.0))
        }
        BaseSize::Content => c.clamp(intrinsic),
    }
}
