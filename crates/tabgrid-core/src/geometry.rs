//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// The pixel axis a length is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left to right.
    X,
    /// Top to bottom.
    Y,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Orientation of a splitter line.
///
/// A `Vertical` splitter is a vertical line between side-by-side regions
/// and is dragged along x. A `Horizontal` splitter sits between stacked
/// regions and is dragged along y. Panes carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
    #[default]
    None,
}

impl Orientation {
    /// Axis along which a splitter with this orientation moves.
    #[inline]
    #[must_use]
    pub const fn drag_axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::X),
            Self::Horizontal => Some(Axis::Y),
            Self::None => None,
        }
    }

    /// Orientation of the splitters that separate regions laid out along `axis`.
    #[inline]
    #[must_use]
    pub const fn separating(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::Vertical,
            Axis::Y => Self::Horizontal,
        }
    }
}

/// A container size in (possibly fractional) pixels.
///
/// Never negative: constructors clamp negative and NaN inputs to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero-area size; the state of a container that has not been laid out yet.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size, clamping each dimension to `>= 0`.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    /// True when both dimensions are strictly positive.
    #[inline]
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Dimension measured along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// A share of the container, clamped into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    pub const ZERO: Self = Self(0.0);
    pub const HALF: Self = Self(0.5);
    pub const ONE: Self = Self(1.0);

    /// Create a fraction, clamping into `[0, 1]` (NaN becomes 0).
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Add a signed delta, re-clamping the result.
    #[must_use]
    pub fn saturating_add(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// True when the fraction is exactly zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Fraction {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(value: Fraction) -> Self {
        value.0
    }
}

/// An integer pixel rectangle, origin at the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Start coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn start(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Length along `axis`.
    #[inline]
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}
