// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content measurement and intrinsic sizes.
//!
//! Text and image elements are sized by a caller-supplied [`ContentMeasure`]
//! collaborator. Containers are sized from their children. Both are the
//! *intrinsic* (max-content) border-box size an element has when nothing
//! constrains it, used as the base size for `FitContent`, `Grow`, and
//! `Shrink` sizing.
//!
//! Intrinsic sizes are memoized per element: a clean element reuses its memo
//! across passes and a dirty one is recomputed at most once per pass. This
//! bounds the measurement collaborator to one call per dirty leaf per pass.

use kurbo::Size;

use crate::element::{ContentId, ElementStore, INVALID};
use crate::resolve::{BaseSize, ContentBox, resolve};
use crate::style::{Axis, LayoutStyle};

/// Measures caller-owned content.
///
/// Implementations must be deterministic and free of observable side
/// effects. The returned size is the content size, without padding.
pub trait ContentMeasure {
    /// Returns the natural size of `content` under `style`.
    fn measure(&self, content: ContentId, style: &LayoutStyle) -> Size;
}

impl<F> ContentMeasure for F
where
    F: Fn(ContentId, &LayoutStyle) -> Size,
{
    fn measure(&self, content: ContentId, style: &LayoutStyle) -> Size {
        self(content, style)
    }
}

/// A [`ContentMeasure`] that reports every content item as zero-sized.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContent;

impl ContentMeasure for NoContent {
    fn measure(&self, _content: ContentId, _style: &LayoutStyle) -> Size {
        Size::ZERO
    }
}

/// Per-pass measurement state.
pub(crate) struct MeasureCx<'a> {
    pub(crate) measure: &'a dyn ContentMeasure,
    pub(crate) pass: u64,
    pub(crate) calls: u32,
}

impl core::fmt::Debug for MeasureCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeasureCx")
            .field("pass", &self.pass)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

/// Narrows a kurbo coordinate to layout precision.
#[inline]
#[expect(
    clippy::cast_possible_truncation,
    reason = "layout runs in f32; kurbo sizes are narrowed on entry"
)]
pub(crate) fn narrow(v: f64) -> f32 {
    v as f32
}

impl ElementStore {
    /// Returns the intrinsic border-box size of `idx` as `(width, height)`.
    pub(crate) fn intrinsic_size(&mut self, idx: u32, cx: &mut MeasureCx<'_>) -> (f32, f32) {
        let i = idx as usize;
        if self.intrinsic_valid(idx, cx.pass) {
            return (self.intrinsic_width[i], self.intrinsic_height[i]);
        }

        let style = self.style[i];
        let (inner_w, inner_h) = if self.kind[i].is_content_leaf() {
            match self.content[i] {
                Some(content) => {
                    cx.calls += 1;
                    let size = cx.measure.measure(content, &style);
                    (narrow(size.width).max(0.0), narrow(size.height).max(0.0))
                }
                None => (0.0, 0.0),
            }
        } else {
            self.children_extent(idx, &style, cx)
        };

        let w = inner_w + style.padding.sum(Axis::Horizontal);
        let h = inner_h + style.padding.sum(Axis::Vertical);
        self.intrinsic_width[i] = w;
        self.intrinsic_height[i] = h;
        self.intrinsic_stamp[i] = cx.pass;
        (w, h)
    }

    /// Sum of child contributions along the main axis plus gaps, and the
    /// largest contribution along the cross axis.
    fn children_extent(
        &mut self,
        idx: u32,
        style: &LayoutStyle,
        cx: &mut MeasureCx<'_>,
    ) -> (f32, f32) {
        let main_axis = style.direction.main_axis();
        let mut main = 0.0_f32;
        let mut cross = 0.0_f32;
        let mut count = 0_u32;

        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let (w, h) = self.outer_contribution(child, cx);
            let (m, c) = match main_axis {
                Axis::Horizontal => (w, h),
                Axis::Vertical => (h, w),
            };
            main += m;
            cross = cross.max(c);
            count += 1;
            child = self.next_sibling[child as usize];
        }
        if count > 1 {
            main += style.gap * (count - 1) as f32;
        }
        match main_axis {
            Axis::Horizontal => (main, cross),
            Axis::Vertical => (cross, main),
        }
    }

    /// Margin-box size a child asks for when its parent is unconstrained.
    ///
    /// Percentages have nothing to resolve against here and behave like
    /// fit-content.
    fn outer_contribution(&mut self, child: u32, cx: &mut MeasureCx<'_>) -> (f32, f32) {
        let style = self.style[child as usize];
        let rc = resolve(&style, ContentBox::new(f32::INFINITY, f32::INFINITY));
        let needs_content =
            rc.width.base == BaseSize::Content || rc.height.base == BaseSize::Content;
        let (iw, ih) = if needs_content {
            self.intrinsic_size(child, cx)
        } else {
            (0.0, 0.0)
        };
        let w = match rc.width.base {
            BaseSize::Definite(v) => v,
            BaseSize::Content => iw,
        };
        let h = match rc.height.base {
            BaseSize::Definite(v) => v,
            BaseSize::Content => ih,
        };
        (
            rc.width.clamp(w) + rc.width.margin,
            rc.height.clamp(h) + rc.height.margin,
        )
    }
}
