// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style resolution.
//!
//! [`resolve`] turns a [`LayoutStyle`] plus the parent's content box into a
//! [`ResolvedConstraint`]: definite sizes in pixels where the style allows it,
//! effective bounds, and flex factors. It is a pure function and is called
//! again on every solver run rather than cached.
//!
//! Percentages are resolved first, against the parent content box minus the
//! element's own margins. Fixed sizes are definite as given. Content-based
//! sizes are left open for the solver to fill from the element's intrinsic
//! size. Grow and shrink distribution happens after all of this.

use crate::style::{Axis, LayoutStyle, Sizing};

/// The space inside a container's padding, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBox {
    /// Content width.
    pub width: f32,
    /// Content height.
    pub height: f32,
}

impl ContentBox {
    /// Creates a content box.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Where an element's base size along one axis comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BaseSize {
    /// Known up front (fixed or percent), before bounds are applied.
    Definite(f32),
    /// Taken from the element's intrinsic size.
    Content,
}

/// Constraint along a single axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisConstraint {
    /// Base size source.
    pub base: BaseSize,
    /// Effective minimum border-box size. Never less than the padding.
    pub min: f32,
    /// Effective maximum border-box size. Never less than `min`.
    pub max: f32,
    /// Grow factor (zero if inflexible).
    pub grow: f32,
    /// Shrink factor (zero if inflexible).
    pub shrink: f32,
    /// Sum of both margins along this axis.
    pub margin: f32,
    /// Leading margin along this axis.
    pub margin_start: f32,
}

impl AxisConstraint {
    /// Clamps `size` into `[min, max]`. If the bounds conflict, `min` wins.
    #[inline]
    #[must_use]
    pub fn clamp(&self, size: f32) -> f32 {
        size.min(self.max).max(self.min)
    }
}

/// The normalized constraint record consumed by the flex solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConstraint {
    /// Horizontal constraint.
    pub width: AxisConstraint,
    /// Vertical constraint.
    pub height: AxisConstraint,
}

impl ResolvedConstraint {
    /// Constraint along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(&self, axis: Axis) -> &AxisConstraint {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }
}

/// Resolves `style` against the parent's content box.
///
/// A non-finite parent extent (used while measuring intrinsic sizes) leaves
/// percentages content-based on that axis.
#[must_use]
pub fn resolve(style: &LayoutStyle, parent: ContentBox) -> ResolvedConstraint {
    ResolvedConstraint {
        width: resolve_axis(style, Axis::Horizontal, parent.width),
        height: resolve_axis(style, Axis::Vertical, parent.height),
    }
}

fn resolve_axis(style: &LayoutStyle, axis: Axis, parent_extent: f32) -> AxisConstraint {
    let sizing = style.sizing(axis);
    let bounds = style.bounds(axis);
    let margin = style.margin.sum(axis);
    let padding = style.padding.sum(axis);

    let base = match sizing {
        Sizing::Percent(fraction) if parent_extent.is_finite() => {
            BaseSize::Definite(fraction * (parent_extent - margin).max(0.0))
        }
        Sizing::Fixed(v) => BaseSize::Definite(v),
        _ => BaseSize::Content,
    };

    let min = bounds.min.max(padding);
    let max = bounds.max.max(min);

    AxisConstraint {
        base,
        min,
        max,
        grow: sizing.grow_factor(),
        shrink: sizing.shrink_factor(),
        margin,
        margin_start: style.margin.start(axis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Bounds, Edges};

    #[test]
    fn percent_resolves_against_parent_minus_margins() {
        let style = LayoutStyle {
            width: Sizing::Percent(0.5),
            margin: Edges::symmetric(10.0, 0.0),
            ..LayoutStyle::DEFAULT
        };
        let rc = resolve(&style, ContentBox::new(220.0, 100.0));
        assert_eq!(rc.width.base, BaseSize::Definite(100.0));
        assert_eq!(rc.width.margin, 20.0);
        assert_eq!(rc.height.base, BaseSize::Content);
    }

    #[test]
    fn percent_without_finite_parent_is_content_based() {
        let style = LayoutStyle {
            width: Sizing::Percent(0.5),
            ..LayoutStyle::DEFAULT
        };
        let rc = resolve(&style, ContentBox::new(f32::INFINITY, 0.0));
        assert_eq!(rc.width.base, BaseSize::Content);
    }

    #[test]
    fn padding_raises_minimum() {
        let style = LayoutStyle {
            padding: Edges::all(8.0),
            width_bounds: Bounds::new(4.0, 10.0),
            ..LayoutStyle::DEFAULT
        };
        let rc = resolve(&style, ContentBox::new(100.0, 100.0));
        assert_eq!(rc.width.min, 16.0);
        // Max is raised to meet the effective minimum.
        assert_eq!(rc.width.max, 16.0);
        assert_eq!(rc.width.clamp(3.0), 16.0);
    }

    #[test]
    fn min_wins_over_max() {
        let style = LayoutStyle {
            height_bounds: Bounds::new(50.0, 20.0),
            ..LayoutStyle::DEFAULT
        };
        let rc = resolve(&style, ContentBox::new(100.0, 100.0));
        assert_eq!(rc.height.clamp(35.0), 50.0);
    }

    #[test]
    fn flex_factors_are_carried() {
        let style = LayoutStyle {
            width: Sizing::Grow(2.0),
            height: Sizing::Shrink(0.5),
            ..LayoutStyle::DEFAULT
        };
        let rc = resolve(&style, ContentBox::new(100.0, 100.0));
        assert_eq!(rc.width.grow, 2.0);
        assert_eq!(rc.width.shrink, 1.0);
        assert_eq!(rc.height.grow, 0.0);
        assert_eq!(rc.height.shrink, 0.5);
    }
}
