use serde::{Deserialize, Serialize};

/// Tolerance below which a transform parameter counts as neutral.
pub const IDENTITY_EPSILON: f64 = 1e-6;

/// Affine transform applied to a frame.
///
/// The destination is rotated by `alpha` and scaled by `zoom` around the
/// frame centre, then shifted by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineTransform {
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Rotation angle in radians.
    pub alpha: f64,
    /// Zoom in percent, `0` meaning no zoom.
    pub zoom: f64,
}

impl AffineTransform {
    /// Create a transform from all four parameters.
    pub fn new(x: f64, y: f64, alpha: f64, zoom: f64) -> Self {
        Self { x, y, alpha, zoom }
    }

    /// The neutral transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A pure translation.
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// A pure rotation around the frame centre.
    pub fn rotation(alpha: f64) -> Self {
        Self {
            alpha,
            ..Self::default()
        }
    }

    /// Whether every parameter is within [`IDENTITY_EPSILON`] of neutral.
    pub fn is_identity(&self) -> bool {
        [self.x, self.y, self.alpha, self.zoom]
            .iter()
            .all(|v| v.abs() < IDENTITY_EPSILON)
    }
}
