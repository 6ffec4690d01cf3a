//! Resolved numbers for one drift cycle.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2D;

/// Immutable plan for a single drift animation.
///
/// Built fresh for every cycle and handed straight to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftTraits {
    /// Pan offset reached at the end of the cycle.
    pub pan: Vector2D,
    /// Zoom factor reached at the end of the cycle.
    pub zoom: f64,
    /// Cycle length in seconds.
    pub duration: f64,
    pub autoreverses: bool,
    /// `1.0` or `f64::INFINITY`.
    pub repeat_count: f64,
    /// Run from `(pan, zoom)` back to identity instead of the other way.
    pub zoom_out: bool,
}

impl DriftTraits {
    /// Whether the cycle repeats forever.
    pub fn repeats_forever(&self) -> bool {
        self.repeat_count.is_infinite()
    }

    /// A zoom of exactly one means the zoom channel is a no-op.
    pub fn has_zoom(&self) -> bool {
        self.zoom != 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(zoom: f64, repeat_count: f64) -> DriftTraits {
        DriftTraits {
            pan: Vector2D::new(-10.0, 4.0),
            zoom,
            duration: 2.5,
            autoreverses: repeat_count.is_infinite(),
            repeat_count,
            zoom_out: false,
        }
    }

    #[test]
    fn test_repeat_flags() {
        assert!(traits(1.2, f64::INFINITY).repeats_forever());
        assert!(!traits(1.2, 1.0).repeats_forever());
    }

    #[test]
    fn test_identity_zoom() {
        assert!(!traits(1.0, 1.0).has_zoom());
        assert!(traits(1.01, 1.0).has_zoom());
    }
}
