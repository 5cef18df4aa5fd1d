// Copyright 2026 the Talus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout style inputs.
//!
//! Everything in this module is plain data. Interpretation happens in
//! [`resolve`](crate::resolve) and the flex solver.

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis (widths).
    Horizontal,
    /// The y axis (heights).
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// How an element is sized along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Sizing {
    /// A fixed size in pixels.
    Fixed(f32),
    /// A fraction (`0.0..=1.0`) of the parent's content box.
    Percent(f32),
    /// Size to content, then take a share of surplus space weighted by the
    /// factor. Grow elements also give up space (shrink factor 1) when the
    /// line overflows.
    Grow(f32),
    /// Size to content, then give up space in proportion to
    /// `factor × base size` when the line overflows.
    Shrink(f32),
    /// Size to content and never flex.
    #[default]
    FitContent,
}

impl Sizing {
    /// Weight used when distributing surplus main-axis space.
    #[inline]
    #[must_use]
    pub const fn grow_factor(self) -> f32 {
        match self {
            Self::Grow(factor) => factor,
            _ => 0.0,
        }
    }

    /// Weight used when distributing a main-axis deficit.
    #[inline]
    #[must_use]
    pub const fn shrink_factor(self) -> f32 {
        match self {
            Self::Grow(_) => 1.0,
            Self::Shrink(factor) => factor,
            _ => 0.0,
        }
    }
}

/// Inclusive size bounds along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum border-box size.
    pub min: f32,
    /// Maximum border-box size (`f32::INFINITY` for unbounded).
    pub max: f32,
}

impl Bounds {
    /// No lower bound beyond zero, no upper bound.
    pub const UNBOUNDED: Self = Self {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// Creates bounds from a minimum and maximum.
    #[inline]
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Only a lower bound.
    #[inline]
    #[must_use]
    pub const fn at_least(min: f32) -> Self {
        Self {
            min,
            max: f32::INFINITY,
        }
    }

    /// Only an upper bound.
    #[inline]
    #[must_use]
    pub const fn at_most(max: f32) -> Self {
        Self { min: 0.0, max }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Per-side lengths for padding and margin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    /// Left side.
    pub left: f32,
    /// Right side.
    pub right: f32,
    /// Top side.
    pub top: f32,
    /// Bottom side.
    pub bottom: f32,
}

impl Edges {
    /// All sides zero.
    pub const ZERO: Self = Self::all(0.0);

    /// The same length on all four sides.
    #[inline]
    #[must_use]
    pub const fn all(v: f32) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    /// `horizontal` on left and right, `vertical` on top and bottom.
    #[inline]
    #[must_use]
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    /// The leading edge along `axis` (left or top).
    #[inline]
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Sum of both edges along `axis`.
    #[inline]
    #[must_use]
    pub fn sum(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left + self.right,
            Axis::Vertical => self.top + self.bottom,
        }
    }
}

/// Main-axis direction of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
}

impl Direction {
    /// The axis children are laid out along.
    #[inline]
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }
}

/// Cross-axis alignment of children within their line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align to the leading edge.
    #[default]
    Start,
    /// Center in the line.
    Center,
    /// Align to the trailing edge.
    End,
    /// Content-sized children fill the line's cross size.
    Stretch,
}

/// Main-axis placement of children once their sizes are final.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Pack at the leading edge.
    #[default]
    Start,
    /// Center the packed children.
    Center,
    /// Pack at the trailing edge.
    End,
    /// Spread leftover space evenly between children.
    SpaceBetween,
}

/// Whether children may break onto multiple lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Wrap {
    /// A single line; overflow is reported, never wrapped.
    #[default]
    NoWrap,
    /// Break greedily when the next child would exceed the content box.
    Wrap,
}

/// The full set of layout inputs for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutStyle {
    /// Horizontal sizing mode.
    pub width: Sizing,
    /// Vertical sizing mode.
    pub height: Sizing,
    /// Bounds on the border-box width.
    pub width_bounds: Bounds,
    /// Bounds on the border-box height.
    pub height_bounds: Bounds,
    /// Space between the border box and the content box.
    pub padding: Edges,
    /// Space outside the border box.
    pub margin: Edges,
    /// Main-axis direction for children.
    pub direction: Direction,
    /// Cross-axis alignment for children.
    pub align: Align,
    /// Main-axis placement for children.
    pub justify: Justify,
    /// Line wrapping for children.
    pub wrap: Wrap,
    /// Space between adjacent children and between wrapped lines.
    pub gap: f32,
}

impl LayoutStyle {
    /// Fit-content on both axes, no bounds, no spacing, row direction.
    pub const DEFAULT: Self = Self {
        width: Sizing::FitContent,
        height: Sizing::FitContent,
        width_bounds: Bounds::UNBOUNDED,
        height_bounds: Bounds::UNBOUNDED,
        padding: Edges::ZERO,
        margin: Edges::ZERO,
        direction: Direction::Row,
        align: Align::Start,
        justify: Justify::Start,
        wrap: Wrap::NoWrap,
        gap: 0.0,
    };

    /// Sizing mode along `axis`.
    #[inline]
    #[must_use]
    pub const fn sizing(&self, axis: Axis) -> Sizing {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Bounds along `axis`.
    #[inline]
    #[must_use]
    pub const fn bounds(&self, axis: Axis) -> Bounds {
        match axis {
            Axis::Horizontal => self.width_bounds,
            Axis::Vertical => self.height_bounds,
        }
    }
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}
