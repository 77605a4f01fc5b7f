// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal coordinate types for the bounds extension point.

/// Schematic coordinate unit.
pub type Coord = i32;

/// Point in schematic space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CoordPoint {
    /// Horizontal coordinate.
    pub x: Coord,
    /// Vertical coordinate.
    pub y: Coord,
}

impl CoordPoint {
    /// Creates a point.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by inclusive corners.
///
/// [`CoordRect::EMPTY`] has inverted corners so that it is the identity of
/// [`CoordRect::union`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoordRect {
    /// Lower-left corner.
    pub min: CoordPoint,
    /// Upper-right corner.
    pub max: CoordPoint,
}

impl CoordRect {
    /// Rectangle covering nothing.
    pub const EMPTY: Self = Self {
        min: CoordPoint::new(Coord::MAX, Coord::MAX),
        max: CoordPoint::new(Coord::MIN, Coord::MIN),
    };

    /// Zero-area rectangle at `p`.
    pub const fn from_point(p: CoordPoint) -> Self {
        Self { min: p, max: p }
    }

    /// Returns `true` when the rectangle covers no point.
    pub const fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Smallest rectangle covering both.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            min: CoordPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: CoordPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

impl Default for CoordRect {
    fn default() -> Self {
        Self::EMPTY
    }
}
