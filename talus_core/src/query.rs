// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-side queries over computed geometry.
//!
//! Every query answers from the last completed pass. Nothing here triggers
//! layout.

use kurbo::{Point, Rect, Size};

use crate::LayoutContext;
use crate::LayoutError;
use crate::element::{ElementId, INVALID, LayoutChanges};

impl LayoutContext {
    /// Border box of `id` relative to its parent's border box.
    pub fn rect(&self, id: ElementId) -> Result<Rect, LayoutError> {
        self.store.validate(id)?;
        let (x, y, w, h) = self.store.geometry_at(id.idx);
        Ok(Rect::from_origin_size(
            (f64::from(x), f64::from(y)),
            (f64::from(w), f64::from(h)),
        ))
    }

    /// Border box of `id` in the coordinate space of its tree's root parent.
    pub fn absolute_rect(&self, id: ElementId) -> Result<Rect, LayoutError> {
        self.store.validate(id)?;
        let (mut x, mut y, w, h) = self.store.geometry_at(id.idx);
        let mut p = self.store.parent[id.idx as usize];
        while p != INVALID {
            x += self.store.x[p as usize];
            y += self.store.y[p as usize];
            p = self.store.parent[p as usize];
        }
        Ok(Rect::from_origin_size(
            (f64::from(x), f64::from(y)),
            (f64::from(w), f64::from(h)),
        ))
    }

    /// Extent of the element's content, including padding.
    ///
    /// May exceed the border box when children could not be shrunk below
    /// their minimums.
    pub fn content_size(&self, id: ElementId) -> Result<Size, LayoutError> {
        self.store.validate(id)?;
        let i = id.idx as usize;
        Ok(Size::new(
            f64::from(self.store.content_width[i]),
            f64::from(self.store.content_height[i]),
        ))
    }

    /// How far the content extends past the border box on each axis, or zero.
    pub fn overflow(&self, id: ElementId) -> Result<Size, LayoutError> {
        self.store.validate(id)?;
        let i = id.idx as usize;
        Ok(Size::new(
            f64::from((self.store.content_width[i] - self.store.width[i]).max(0.0)),
            f64::from((self.store.content_height[i] - self.store.height[i]).max(0.0)),
        ))
    }

    /// Depth-first pre-order of all live elements, as of the last pass or
    /// drain.
    #[must_use]
    pub fn paint_order(&self) -> &[u32] {
        self.store.paint_order()
    }

    /// Moves the renderer feed accumulated since the last drain into
    /// `changes`.
    pub fn drain_changes(&mut self, changes: &mut LayoutChanges) {
        self.store.drain_changes_into(changes);
    }

    /// Returns the front-most element under `root` whose border box contains
    /// `point`, given in the same space as [`absolute_rect`](Self::absolute_rect).
    ///
    /// Later elements in paint order are in front. Children are not clipped
    /// to their parents.
    pub fn hit_test(
        &self,
        root: ElementId,
        point: Point,
    ) -> Result<Option<ElementId>, LayoutError> {
        self.store.validate(root)?;
        let (mut ox, mut oy) = (0.0_f32, 0.0_f32);
        let mut p = self.store.parent[root.idx as usize];
        while p != INVALID {
            ox += self.store.x[p as usize];
            oy += self.store.y[p as usize];
            p = self.store.parent[p as usize];
        }
        let mut hit = None;
        self.hit_dfs(root.idx, ox, oy, point, &mut hit);
        Ok(hit.map(|idx| self.store.id_at(idx)))
    }

    fn hit_dfs(&self, idx: u32, ox: f32, oy: f32, point: Point, hit: &mut Option<u32>) {
        let i = idx as usize;
        let x = ox + self.store.x[i];
        let y = oy + self.store.y[i];
        let rect = Rect::from_origin_size(
            (f64::from(x), f64::from(y)),
            (f64::from(self.store.width[i]), f64::from(self.store.height[i])),
        );
        if rect.contains(point) {
            *hit = Some(idx);
        }
        let mut child = self.store.first_child[i];
        while child != INVALID {
            self.hit_dfs(child, x, y, point, hit);
            child = self.store.next_sibling[child as usize];
        }
    }
}
