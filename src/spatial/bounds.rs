//! Axis-aligned bounds of a position set, via rstar's AABB.
//!
//! Only the xy plane is considered; z is layout-inert.

use rstar::{Envelope, AABB};

use crate::graph::Position;

/// The xy bounding box of a non-empty position set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    envelope: AABB<[f32; 2]>,
}

impl Bounds {
    pub fn min_x(&self) -> f32 {
        self.envelope.lower()[0]
    }

    pub fn min_y(&self) -> f32 {
        self.envelope.lower()[1]
    }

    pub fn max_x(&self) -> f32 {
        self.envelope.upper()[0]
    }

    pub fn max_y(&self) -> f32 {
        self.envelope.upper()[1]
    }

    pub fn width(&self) -> f32 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f32 {
        self.max_y() - self.min_y()
    }

    /// Midpoint of the box.
    pub fn center(&self) -> (f32, f32) {
        let [x, y] = self.envelope.center();
        (x, y)
    }

    /// Whether every point of `self` lies inside `other`, allowing `tolerance`
    /// on each side.
    pub fn within(&self, other: &Bounds, tolerance: f32) -> bool {
        self.min_x() >= other.min_x() - tolerance
            && self.min_y() >= other.min_y() - tolerance
            && self.max_x() <= other.max_x() + tolerance
            && self.max_y() <= other.max_y() + tolerance
    }

    /// A box from its corners.
    pub fn from_corners(min: (f32, f32), max: (f32, f32)) -> Self {
        Self {
            envelope: AABB::from_corners([min.0, min.1], [max.0, max.1]),
        }
    }

    /// `[min_x, min_y, max_x, max_y]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.min_x(), self.min_y(), self.max_x(), self.max_y()]
    }
}

/// Bounding box of `positions`, or None when empty.
pub fn bounds(positions: &[Position]) -> Option<Bounds> {
    if positions.is_empty() {
        return None;
    }
    let points: Vec<[f32; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();
    Some(Bounds {
        envelope: AABB::from_points(&points),
    })
}
