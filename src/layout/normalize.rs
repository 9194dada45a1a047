//! Viewport normalization.
//!
//! Rescales and recenters a position set so its xy bounding box fits a
//! square viewport centered on the origin. A single uniform scale (the
//! smaller of the two per-axis factors) keeps the aspect ratio, so the wider
//! axis exactly spans the viewport and the other fits inside it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{check_finite, Position};
use crate::spatial::{self, Bounds};

/// Target viewport for [`recalibrate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Side length of the square viewport (default: 8.0).
    pub size: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { size: 8.0 }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(Error::parameter("viewport_size", self.size));
        }
        Ok(())
    }

    /// The viewport as a box, `[-size/2, size/2]` on both axes.
    pub fn bounds(&self) -> Bounds {
        let half = self.size / 2.0;
        Bounds::from_corners((-half, -half), (half, half))
    }
}

/// Fit `positions` into the viewport.
///
/// An axis with zero extent places no constraint on the scale; when both are
/// zero (a single node, or all nodes coincident) the scale is 1 and the set is
/// only recentered. `z` is carried through unchanged. Non-finite coordinates
/// are rejected.
pub fn recalibrate(positions: &[Position], viewport: &ViewportConfig) -> Result<Vec<Position>> {
    viewport.validate()?;
    check_finite(positions)?;

    let Some(bounds) = spatial::bounds(positions) else {
        return Ok(Vec::new());
    };

    let scale = fit_scale(&bounds, viewport.size);
    let (cx, cy) = bounds.center();

    Ok(positions
        .iter()
        .map(|p| Position::new((p.x - cx) * scale, (p.y - cy) * scale, p.z))
        .collect())
}

fn fit_scale(bounds: &Bounds, size: f32) -> f32 {
    let axis_scale = |span: f32| (span > 0.0).then(|| size / span);

    match (axis_scale(bounds.width()), axis_scale(bounds.height())) {
        (Some(sx), Some(sy)) => sx.min(sy),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    }
}
