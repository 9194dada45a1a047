//! Node identifier and position types.
//!
//! Nodes are identified by their index in the node sequence. Each node has:
//! - A stable 0-based identifier (its slot in the position buffer)
//! - A position (x, y, z) in layout space; z is carried but never laid out

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphDefect, Result};

/// Node identifier.
///
/// Wraps the node's index in the graph's position sequence. Indices are
/// contiguous, so a `NodeId` is valid iff it is below the graph's node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the id as a slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A node position in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A position on the z = 0 plane.
    #[inline]
    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Distance to `other` in the xy plane. z is ignored.
    #[inline]
    pub fn planar_distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether all three coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Reject position sets holding NaN or an infinity.
pub(crate) fn check_finite(positions: &[Position]) -> Result<()> {
    match positions.iter().position(|p| !p.is_finite()) {
        Some(node) => Err(GraphDefect::NonFinitePosition { node }.into()),
        None => Ok(()),
    }
}

/// Flatten positions into `[x0, y0, z0, x1, y1, z1, ...]`.
pub fn flatten_positions(positions: &[Position]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(positions.len() * 3);
    for p in positions {
        flat.extend_from_slice(&[p.x, p.y, p.z]);
    }
    flat
}

/// Parse `[x0, y0, z0, x1, y1, z1, ...]` into positions.
pub fn positions_from_flat(flat: &[f32]) -> Result<Vec<Position>> {
    if flat.len() % 3 != 0 {
        return Err(GraphDefect::MalformedBuffer {
            len: flat.len(),
            stride: 3,
        }
        .into());
    }
    let positions: Vec<Position> = flat
        .chunks_exact(3)
        .map(|c| Position::new(c[0], c[1], c[2]))
        .collect();
    check_finite(&positions)?;
    Ok(positions)
}
