// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flexbox constraint solver.
//!
//! [`solve_container`] lays out the direct children of one container whose
//! border box is already known. It runs in two phases so that a cache hit can
//! be verified without side effects:
//!
//! 1. **Solve**: read the store, write per-child scratch columns in the
//!    [`FrameArena`], and return a [`Solution`] borrowing them.
//! 2. **Commit**: [`Solution::commit`] writes child geometry back into the
//!    store and marks the renderer-feed channels.
//!
//! Per container the solve phase:
//!
//! 1. Resolves every child against the content box and fixes its
//!    hypothetical main size (definite or intrinsic, clamped to its bounds).
//! 2. Breaks children into lines (a single line unless wrapping).
//! 3. Per line, distributes the free space: surplus by grow factor, deficit
//!    by shrink factor times base size. Children whose clamped size differs
//!    from their share are frozen and the rest redistributed, at most
//!    `n + 1` rounds.
//! 4. Optionally snaps flexible sizes to whole pixels, giving the remainder
//!    to the last flexible child in document order.
//! 5. Sizes and places children on the cross axis by the alignment mode.
//! 6. Places children on the main axis by the justification mode.
//!
//! Children whose minimums exceed the available space are never forced below
//! them. The overflow shows up as a content size larger than the container.

use crate::LayoutError;
use crate::arena::{FrameArena, columns};
use crate::element::{ElementStore, INVALID};
use crate::measure::MeasureCx;
use crate::resolve::{BaseSize, ContentBox, resolve};
use crate::simd::{clamp_batch, clamp_in_place, distribute_batch, sum_batch};
use crate::style::{Align, Axis, Justify, Wrap};

/// Per-child `f32` columns the solver allocates.
const FLOAT_COLUMNS: usize = 16;

/// Per-child `u32` columns the solver allocates: child index, line end,
/// flags.
const INT_COLUMNS: usize = 3;

const FROZEN: u32 = 1;
const FILLS_LINE: u32 = 2;

/// Geometry for every child of one container, borrowed from the frame arena.
#[derive(Debug)]
pub(crate) struct Solution<'a> {
    pub(crate) main_axis: Axis,
    pub(crate) children: &'a [u32],
    pub(crate) main_pos: &'a [f32],
    pub(crate) cross_pos: &'a [f32],
    pub(crate) main_size: &'a [f32],
    pub(crate) cross_size: &'a [f32],
    pub(crate) content_width: f32,
    pub(crate) content_height: f32,
    pub(crate) lines: u32,
}

impl Solution<'_> {
    /// Geometry of the `i`-th child as `(x, y, width, height)`.
    #[inline]
    pub(crate) fn rect(&self, i: usize) -> (f32, f32, f32, f32) {
        match self.main_axis {
            Axis::Horizontal => (
                self.main_pos[i],
                self.cross_pos[i],
                self.main_size[i],
                self.cross_size[i],
            ),
            Axis::Vertical => (
                self.cross_pos[i],
                self.main_pos[i],
                self.cross_size[i],
                self.main_size[i],
            ),
        }
    }

    /// Writes every child's geometry into the store.
    pub(crate) fn commit(&self, store: &mut ElementStore) {
        for (i, &child) in self.children.iter().enumerate() {
            let (x, y, w, h) = self.rect(i);
            store.write_geometry(child, x, y, w, h);
        }
    }

    /// Returns whether the store already holds exactly this geometry.
    pub(crate) fn matches_store(&self, store: &ElementStore) -> bool {
        self.children.iter().enumerate().all(|(i, &child)| {
            let (x, y, w, h) = self.rect(i);
            let c = child as usize;
            x.to_bits() == store.x[c].to_bits()
                && y.to_bits() == store.y[c].to_bits()
                && w.to_bits() == store.width[c].to_bits()
                && h.to_bits() == store.height[c].to_bits()
        })
    }

    /// Number of children laid out.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.children.len()
    }
}

#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "child counts are bounded by the u32 element capacity"
)]
pub(crate) fn to_u32(v: usize) -> u32 {
    v as u32
}

/// Solves the children of container `idx` at its current border-box size.
pub(crate) fn solve_container<'a>(
    store: &mut ElementStore,
    arena: &'a mut FrameArena,
    idx: u32,
    pixel_snapping: bool,
    cx: &mut MeasureCx<'_>,
) -> Result<Solution<'a>, LayoutError> {
    let i = idx as usize;
    let style = store.style[i];
    let main_axis = style.direction.main_axis();
    let cross_axis = main_axis.cross();
    let padding = style.padding;

    let content = ContentBox::new(
        (store.width[i] - padding.sum(Axis::Horizontal)).max(0.0),
        (store.height[i] - padding.sum(Axis::Vertical)).max(0.0),
    );
    let main_avail = content.along(main_axis);
    let cross_avail = content.along(cross_axis);

    let mut n = 0_usize;
    let mut child = store.first_child[i];
    while child != INVALID {
        n += 1;
        child = store.next_sibling[child as usize];
    }
    if n == 0 {
        return Ok(Solution {
            main_axis,
            children: &[],
            main_pos: &[],
            cross_pos: &[],
            main_size: &[],
            cross_size: &[],
            content_width: padding.sum(Axis::Horizontal),
            content_height: padding.sum(Axis::Vertical),
            lines: 0,
        });
    }

    let (ints, floats) = arena.alloc_split(INT_COLUMNS * n, FLOAT_COLUMNS * n)?;
    let (children, rest) = ints.split_at_mut(n);
    let (line_ends, flags) = rest.split_at_mut(n);
    let [
        base,
        min,
        max,
        margin,
        margin_start,
        grow,
        shrink,
        factor,
        target,
        clamped,
        main_size,
        main_pos,
        cross_size,
        cross_pos,
        cross_margin,
        cross_margin_start,
    ] = columns::<FLOAT_COLUMNS>(floats, n);

    // 1. Resolve every child.
    let mut c = store.first_child[i];
    for k in 0..n {
        children[k] = c;
        let rc = resolve(&store.style[c as usize], content);
        let m = rc.along(main_axis);
        let x = rc.along(cross_axis);
        let needs_content = m.base == BaseSize::Content || x.base == BaseSize::Content;
        let (iw, ih) = if needs_content {
            store.intrinsic_size(c, cx)
        } else {
            (0.0, 0.0)
        };
        let (intrinsic_main, intrinsic_cross) = match main_axis {
            Axis::Horizontal => (iw, ih),
            Axis::Vertical => (ih, iw),
        };

        base[k] = match m.base {
            BaseSize::Definite(v) => v,
            BaseSize::Content => intrinsic_main,
        };
        min[k] = m.min;
        max[k] = m.max;
        margin[k] = m.margin;
        margin_start[k] = m.margin_start;
        grow[k] = m.grow;
        shrink[k] = m.shrink;

        let fills = x.base == BaseSize::Content && (x.grow > 0.0 || style.align == Align::Stretch);
        flags[k] = if fills { FILLS_LINE } else { 0 };
        // Cross columns: hypothetical size for now, bounds stashed in the
        // scratch columns until lines are known.
        cross_size[k] = x.clamp(match x.base {
            BaseSize::Definite(v) => v,
            BaseSize::Content => intrinsic_cross,
        });
        target[k] = x.min;
        clamped[k] = x.max;
        cross_margin[k] = x.margin;
        cross_margin_start[k] = x.margin_start;

        c = store.next_sibling[c as usize];
    }
    // Hypothetical main sizes.
    let hypothetical = main_size;
    clamp_in_place(base, min, max);
    hypothetical.copy_from_slice(base);

    // 2. Lines.
    let mut line_count = 0_usize;
    {
        let mut used = 0.0_f32;
        let mut len = 0_usize;
        for k in 0..n {
            let outer = base[k] + margin[k];
            let spacing = if len > 0 { style.gap } else { 0.0 };
            if style.wrap == Wrap::Wrap && len > 0 && used + spacing + outer > main_avail {
                line_ends[line_count] = to_u32(k);
                line_count += 1;
                used = outer;
                len = 1;
            } else {
                used += spacing + outer;
                len += 1;
            }
        }
        line_ends[line_count] = to_u32(n);
        line_count += 1;
    }

    // The cross bounds live in `target`/`clamped` until step 5; stash them
    // in the position columns, which are not written before then.
    cross_pos.copy_from_slice(target);
    main_pos.copy_from_slice(clamped);
    let cross_min = cross_pos;
    let cross_max = main_pos;

    // 3 + 4. Main-axis distribution per line.
    let mut start = 0_usize;
    for &end in &line_ends[..line_count] {
        let end = end as usize;
        let r = start..end;
        distribute_line(
            &FlexLine {
                base: &base[r.clone()],
                min: &min[r.clone()],
                max: &max[r.clone()],
                margin: &margin[r.clone()],
                grow: &grow[r.clone()],
                shrink: &shrink[r.clone()],
                avail: main_avail,
                gap: style.gap,
                pixel_snapping,
            },
            &mut LineScratch {
                factor: &mut factor[r.clone()],
                target: &mut target[r.clone()],
                clamped: &mut clamped[r.clone()],
                flags: &mut flags[r.clone()],
            },
            &mut hypothetical[r],
        )?;
        start = end;
    }
    let main_size = hypothetical;

    // 5. Cross axis: line sizes, child sizes, then positions.
    let cross_start = padding.start(cross_axis);
    let mut line_offset = 0.0_f32;
    let mut start = 0_usize;
    // Final cross positions are written into `target` and moved over after
    // the bounds in `cross_pos` are no longer needed.
    for &end in &line_ends[..line_count] {
        let end = end as usize;
        let line_cross = if line_count == 1 {
            cross_avail
        } else {
            let mut tallest = 0.0_f32;
            for k in start..end {
                tallest = tallest.max(cross_size[k] + cross_margin[k]);
            }
            tallest
        };
        for k in start..end {
            if flags[k] & FILLS_LINE != 0 {
                cross_size[k] = (line_cross - cross_margin[k])
                    .min(cross_max[k])
                    .max(cross_min[k]);
            }
            let free = (line_cross - cross_size[k] - cross_margin[k]).max(0.0);
            let offset = match style.align {
                Align::Start | Align::Stretch => 0.0,
                Align::Center => free * 0.5,
                Align::End => free,
            };
            target[k] = cross_start + line_offset + cross_margin_start[k] + offset;
        }
        line_offset += line_cross + style.gap;
        start = end;
    }
    let cross_pos = cross_min;
    cross_pos.copy_from_slice(target);

    // 6. Main axis positions.
    let main_start = padding.start(main_axis);
    let main_pos = cross_max;
    let mut start = 0_usize;
    for &end in &line_ends[..line_count] {
        let end = end as usize;
        let count = end - start;
        let used = sum_batch(&main_size[start..end])
            + sum_batch(&margin[start..end])
            + style.gap * (count - 1) as f32;
        let free = (main_avail - used).max(0.0);
        let (mut cursor, between) = match style.justify {
            Justify::Start => (0.0, 0.0),
            Justify::Center => (free * 0.5, 0.0),
            Justify::End => (free, 0.0),
            Justify::SpaceBetween if count > 1 => (0.0, free / (count - 1) as f32),
            Justify::SpaceBetween => (0.0, 0.0),
        };
        for k in start..end {
            main_pos[k] = main_start + cursor + margin_start[k];
            cursor += margin[k] + main_size[k] + style.gap + between;
        }
        start = end;
    }

    // Content extent: furthest margin edge of any child plus trailing padding.
    let mut extent_main = 0.0_f32;
    let mut extent_cross = 0.0_f32;
    for k in 0..n {
        extent_main =
            extent_main.max(main_pos[k] + main_size[k] + margin[k] - margin_start[k]);
        extent_cross = extent_cross
            .max(cross_pos[k] + cross_size[k] + cross_margin[k] - cross_margin_start[k]);
    }
    extent_main = (extent_main + padding.sum(main_axis) - main_start).max(padding.sum(main_axis));
    extent_cross =
        (extent_cross + padding.sum(cross_axis) - cross_start).max(padding.sum(cross_axis));
    let (content_width, content_height) = match main_axis {
        Axis::Horizontal => (extent_main, extent_cross),
        Axis::Vertical => (extent_cross, extent_main),
    };

    Ok(Solution {
        main_axis,
        children,
        main_pos,
        cross_pos,
        main_size,
        cross_size,
        content_width,
        content_height,
        lines: to_u32(line_count),
    })
}

/// Read-only inputs for one line of the distribution loop.
struct FlexLine<'l> {
    /// Hypothetical (clamped) main sizes.
    base: &'l [f32],
    min: &'l [f32],
    max: &'l [f32],
    margin: &'l [f32],
    grow: &'l [f32],
    shrink: &'l [f32],
    avail: f32,
    gap: f32,
    pixel_snapping: bool,
}

struct LineScratch<'l> {
    factor: &'l mut [f32],
    target: &'l mut [f32],
    clamped: &'l mut [f32],
    flags: &'l mut [u32],
}

/// Resolves the flexible main sizes of one line into `size`.
///
/// `size` holds the hypothetical sizes on entry.
fn distribute_line(
    line: &FlexLine<'_>,
    scratch: &mut LineScratch<'_>,
    size: &mut [f32],
) -> Result<(), LayoutError> {
    let n = line.base.len();
    let gaps = line.gap * n.saturating_sub(1) as f32;
    let margins = sum_batch(line.margin);
    let free = line.avail - gaps - margins - sum_batch(line.base);
    if free == 0.0 {
        return Ok(());
    }
    let growing = free > 0.0;

    let mut any_flexible = false;
    for k in 0..n {
        let f = if growing {
            line.grow[k]
        } else {
            line.shrink[k] * line.base[k]
        };
        scratch.factor[k] = f;
        if f > 0.0 {
            any_flexible = true;
        } else {
            scratch.flags[k] |= FROZEN;
        }
    }
    if !any_flexible {
        return Ok(());
    }

    for _ in 0..=n {
        let mut fixed = 0.0_f32;
        let mut flex_base = 0.0_f32;
        let mut factor_sum = 0.0_f32;
        for k in 0..n {
            if scratch.flags[k] & FROZEN != 0 {
                fixed += size[k];
                scratch.factor[k] = 0.0;
            } else {
                flex_base += line.base[k];
                factor_sum += scratch.factor[k];
            }
        }
        if factor_sum <= 0.0 {
            break;
        }
        let remaining = line.avail - gaps - margins - fixed - flex_base;
        distribute_batch(
            line.base,
            scratch.factor,
            remaining / factor_sum,
            scratch.target,
        );
        clamp_batch(scratch.target, line.min, line.max, scratch.clamped)?;

        let mut violation = 0.0_f32;
        for k in 0..n {
            if scratch.flags[k] & FROZEN == 0 {
                violation += scratch.clamped[k] - scratch.target[k];
            }
        }

        for k in 0..n {
            if scratch.flags[k] & FROZEN != 0 {
                continue;
            }
            size[k] = scratch.clamped[k];
            let v = scratch.clamped[k] - scratch.target[k];
            // Min violations freeze when the total is positive, max
            // violations when negative.
            if (violation > 0.0 && v > 0.0) || (violation < 0.0 && v < 0.0) {
                scratch.flags[k] |= FROZEN;
            }
        }
        if violation == 0.0 {
            break;
        }
    }

    if line.pixel_snapping {
        snap_line(line, scratch, size, gaps, margins);
    }
    Ok(())
}

/// `f32::floor` without `std`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "layout sizes are far inside the i32 range"
)]
fn floor(v: f32) -> f32 {
    let t = v as i32 as f32;
    if t > v { t - 1.0 } else { t }
}

/// Floors every unfrozen flexible size except the last, which takes what is
/// left of the line. Bounds still win over the remainder.
fn snap_line(
    line: &FlexLine<'_>,
    scratch: &LineScratch<'_>,
    size: &mut [f32],
    gaps: f32,
    margins: f32,
) {
    let n = size.len();
    let Some(last) = (0..n).rev().find(|&k| scratch.flags[k] & FROZEN == 0) else {
        return;
    };
    let mut fixed = 0.0_f32;
    let mut others = 0.0_f32;
    for k in 0..n {
        if scratch.flags[k] & FROZEN != 0 {
            fixed += size[k];
        } else if k != last {
            size[k] = floor(size[k]).max(line.min[k]);
            others += size[k];
        }
    }
    let remaining = line.avail - gaps - margins - fixed;
    size[last] = (remaining - others).min(line.max[last]).max(line.min[last]);
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::element::ElementKind;
    use crate::measure::NoContent;
    use crate::style::{Bounds, Direction, Edges, LayoutStyle, Sizing};

    struct Fixture {
        store: ElementStore,
        arena: FrameArena,
        root: u32,
    }

    impl Fixture {
        fn new(width: f32, height: f32, style: LayoutStyle) -> Self {
            let mut store = ElementStore::new();
            let root = store.allocate(ElementKind::Container, None, 1 << 16).unwrap();
            store.style[root as usize] = style;
            store.width[root as usize] = width;
            store.height[root as usize] = height;
            Self {
                store,
                arena: FrameArena::new(1 << 16),
                root,
            }
        }

        fn child(&mut self, style: LayoutStyle) -> u32 {
            let c = self
                .store
                .allocate(ElementKind::Container, None, 1 << 16)
                .unwrap();
            self.store.style[c as usize] = style;
            self.store.append_child(self.root, c);
            c
        }

        fn grandchild(&mut self, parent: u32, style: LayoutStyle) {
            let c = self
                .store
                .allocate(ElementKind::Container, None, 1 << 16)
                .unwrap();
            self.store.style[c as usize] = style;
            self.store.append_child(parent, c);
        }

        /// Solves and commits; returns `(x, y, w, h)` per child and the
        /// content size.
        fn solve(&mut self, snapping: bool) -> (Vec<(f32, f32, f32, f32)>, (f32, f32)) {
            let mut cx = MeasureCx {
                measure: &NoContent,
                pass: 1,
                calls: 0,
            };
            let sol =
                solve_container(&mut self.store, &mut self.arena, self.root, snapping, &mut cx)
                    .unwrap();
            sol.commit(&mut self.store);
            let rects = (0..sol.len()).map(|k| sol.rect(k)).collect();
            (rects, (sol.content_width, sol.content_height))
        }
    }

    fn row() -> LayoutStyle {
        LayoutStyle::DEFAULT
    }

    fn sized(width: Sizing) -> LayoutStyle {
        LayoutStyle {
            width,
            ..LayoutStyle::DEFAULT
        }
    }

    #[test]
    fn fixed_then_two_grow() {
        let mut fx = Fixture::new(500.0, 100.0, row());
        fx.child(sized(Sizing::Fixed(100.0)));
        fx.child(sized(Sizing::Grow(1.0)));
        fx.child(sized(Sizing::Grow(1.0)));
        let (rects, _) = fx.solve(false);
        let widths: Vec<f32> = rects.iter().map(|r| r.2).collect();
        assert_eq!(widths, [100.0, 200.0, 200.0]);
        let xs: Vec<f32> = rects.iter().map(|r| r.0).collect();
        assert_eq!(xs, [0.0, 100.0, 300.0]);
    }

    #[test]
    fn shrink_pins_at_min_and_reports_overflow() {
        let mut fx = Fixture::new(300.0, 50.0, row());
        for _ in 0..2 {
            fx.child(LayoutStyle {
                width: Sizing::Grow(1.0),
                width_bounds: Bounds::at_least(200.0),
                ..LayoutStyle::DEFAULT
            });
        }
        let (rects, (content_w, _)) = fx.solve(false);
        assert_eq!(rects[0].2, 200.0);
        assert_eq!(rects[1].2, 200.0);
        assert_eq!(content_w, 400.0);
    }

    #[test]
    fn shrink_is_weighted_by_base_size() {
        let mut fx = Fixture::new(150.0, 50.0, row());
        for w in [100.0, 200.0] {
            let c = fx.child(sized(Sizing::Shrink(1.0)));
            fx.grandchild(c, sized(Sizing::Fixed(w)));
        }
        // Deficit 150 split 100:200.
        let (rects, _) = fx.solve(false);
        assert_eq!(rects[0].2, 50.0);
        assert_eq!(rects[1].2, 100.0);
    }

    #[test]
    fn shrink_stops_at_min_bounds() {
        let mut fx = Fixture::new(200.0, 50.0, row());
        for min in [100.0, 200.0] {
            fx.child(LayoutStyle {
                width: Sizing::Shrink(1.0),
                width_bounds: Bounds::at_least(min),
                ..LayoutStyle::DEFAULT
            });
        }
        let (rects, (content_w, _)) = fx.solve(false);
        assert_eq!(rects[0].2, 100.0);
        assert_eq!(rects[1].2, 200.0);
        assert_eq!(content_w, 300.0);
    }

    #[test]
    fn grow_respects_max_and_redistributes() {
        let mut fx = Fixture::new(300.0, 50.0, row());
        fx.child(LayoutStyle {
            width: Sizing::Grow(1.0),
            width_bounds: Bounds::at_most(50.0),
            ..LayoutStyle::DEFAULT
        });
        fx.child(sized(Sizing::Grow(1.0)));
        let (rects, _) = fx.solve(false);
        assert_eq!(rects[0].2, 50.0);
        assert_eq!(rects[1].2, 250.0);
    }

    #[test]
    fn snapping_gives_remainder_to_last_flexible_child() {
        let mut fx = Fixture::new(100.0, 10.0, row());
        for _ in 0..3 {
            fx.child(sized(Sizing::Grow(1.0)));
        }
        fx.child(sized(Sizing::Fixed(0.0)));
        let (rects, _) = fx.solve(true);
        let widths: Vec<f32> = rects.iter().map(|r| r.2).collect();
        assert_eq!(widths, [33.0, 33.0, 34.0, 0.0]);
    }

    #[test]
    fn gap_and_margins_are_excluded_from_distribution() {
        let mut fx = Fixture::new(
            120.0,
            10.0,
            LayoutStyle {
                gap: 10.0,
                padding: Edges::symmetric(5.0, 0.0),
                ..LayoutStyle::DEFAULT
            },
        );
        fx.child(LayoutStyle {
            width: Sizing::Grow(1.0),
            margin: Edges::symmetric(5.0, 0.0),
            ..LayoutStyle::DEFAULT
        });
        fx.child(sized(Sizing::Grow(1.0)));
        // 110 content - 10 gap - 10 margin = 90 → 45 each.
        let (rects, (content_w, _)) = fx.solve(false);
        assert_eq!(rects[0], (10.0, 0.0, 45.0, 0.0));
        assert_eq!(rects[1].0, 70.0);
        assert_eq!(rects[1].2, 45.0);
        assert_eq!(content_w, 120.0);
    }

    #[test]
    fn stretch_and_center_on_cross_axis() {
        let mut fx = Fixture::new(
            100.0,
            80.0,
            LayoutStyle {
                align: Align::Stretch,
                ..LayoutStyle::DEFAULT
            },
        );
        fx.child(sized(Sizing::Fixed(10.0)));
        fx.child(LayoutStyle {
            width: Sizing::Fixed(10.0),
            height: Sizing::Fixed(20.0),
            ..LayoutStyle::DEFAULT
        });
        let (rects, _) = fx.solve(false);
        assert_eq!(rects[0].3, 80.0, "content-sized child stretches");
        assert_eq!(rects[1].3, 20.0, "definite cross size is kept");

        let mut fx = Fixture::new(
            100.0,
            80.0,
            LayoutStyle {
                align: Align::Center,
                ..LayoutStyle::DEFAULT
            },
        );
        fx.child(LayoutStyle {
            width: Sizing::Fixed(10.0),
            height: Sizing::Fixed(20.0),
            ..LayoutStyle::DEFAULT
        });
        let (rects, _) = fx.solve(false);
        assert_eq!(rects[0].1, 30.0);
    }

    #[test]
    fn column_uses_vertical_main_axis() {
        let mut fx = Fixture::new(
            50.0,
            300.0,
            LayoutStyle {
                direction: Direction::Column,
                ..LayoutStyle::DEFAULT
            },
        );
        fx.child(LayoutStyle {
            height: Sizing::Fixed(100.0),
            ..LayoutStyle::DEFAULT
        });
        fx.child(LayoutStyle {
            height: Sizing::Grow(1.0),
            width: Sizing::Percent(0.5),
            ..LayoutStyle::DEFAULT
        });
        let (rects, _) = fx.solve(false);
        assert_eq!(rects[1], (0.0, 100.0, 25.0, 200.0));
    }

    #[test]
    fn justify_modes_place_leftover_space() {
        let place = |justify: Justify| {
            let mut fx = Fixture::new(
                100.0,
                10.0,
                LayoutStyle {
                    justify,
                    ..LayoutStyle::DEFAULT
                },
            );
            fx.child(sized(Sizing::Fixed(20.0)));
            fx.child(sized(Sizing::Fixed(20.0)));
            let (rects, _) = fx.solve(false);
            (rects[0].0, rects[1].0)
        };
        assert_eq!(place(Justify::Start), (0.0, 20.0));
        assert_eq!(place(Justify::Center), (30.0, 50.0));
        assert_eq!(place(Justify::End), (60.0, 80.0));
        assert_eq!(place(Justify::SpaceBetween), (0.0, 80.0));
    }

    #[test]
    fn wrap_breaks_lines_and_stacks_them() {
        let mut fx = Fixture::new(
            100.0,
            100.0,
            LayoutStyle {
                wrap: Wrap::Wrap,
                gap: 10.0,
                ..LayoutStyle::DEFAULT
            },
        );
        for h in [10.0, 30.0, 20.0] {
            fx.child(LayoutStyle {
                width: Sizing::Fixed(40.0),
                height: Sizing::Fixed(h),
                ..LayoutStyle::DEFAULT
            });
        }
        let (rects, (_, content_h)) = fx.solve(false);
        // Line one holds two 40s plus a gap; the third child wraps.
        assert_eq!(rects[0].0, 0.0);
        assert_eq!(rects[1].0, 50.0);
        assert_eq!((rects[2].0, rects[2].1), (0.0, 40.0));
        assert_eq!(content_h, 60.0);
    }

    #[test]
    fn empty_container_reports_padding() {
        let mut fx = Fixture::new(
            100.0,
            100.0,
            LayoutStyle {
                padding: Edges::all(3.0),
                ..LayoutStyle::DEFAULT
            },
        );
        let (rects, content) = fx.solve(false);
        assert!(rects.is_empty());
        assert_eq!(content, (6.0, 6.0));
    }

    #[test]
    fn arena_exhaustion_is_reported() {
        let mut fx = Fixture::new(100.0, 100.0, row());
        fx.child(row());
        fx.arena.set_budget(4);
        let mut cx = MeasureCx {
            measure: &NoContent,
            pass: 1,
            calls: 0,
        };
        let err = solve_container(&mut fx.store, &mut fx.arena, fx.root, false, &mut cx)
            .unwrap_err();
        assert!(
            matches!(err, LayoutError::AllocationFailure { .. }),
            "got {err:?}"
        );
    }
}
