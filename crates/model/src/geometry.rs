//! Sizes, vectors, and insets in viewport points.

use serde::{Deserialize, Serialize};

/// A width/height pair: natural image dimensions or viewport dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size2D {
    pub width: f64,
    pub height: f64,
}

impl Size2D {
    pub const ZERO: Size2D = Size2D {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same factor on both axes.
    pub fn uniform(scale: f64) -> Self {
        Self::new(scale, scale)
    }

    /// Component-wise product.
    pub fn scaled_by(&self, scale: Size2D) -> Size2D {
        Size2D::new(self.width * scale.width, self.height * scale.height)
    }

    /// Multiply both axes by one factor.
    pub fn scaled(&self, factor: f64) -> Size2D {
        self.scaled_by(Size2D::uniform(factor))
    }

    /// True unless both sides are strictly positive (NaN counts as empty).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A signed pan offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Largest single-axis displacement, used to time a pan.
    pub fn max_displacement(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

/// Signed distance an image may still travel in each direction before its
/// edge reaches the viewport edge. Negative values mean no room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Insets {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Vertical pan bound: the larger-magnitude of top/bottom, negated.
    ///
    /// Ties resolve to the bottom inset.
    pub fn vertical_bound(&self) -> f64 {
        if self.top.abs() > self.bottom.abs() {
            -self.top
        } else {
            -self.bottom
        }
    }

    /// Horizontal pan bound: the larger-magnitude of left/right, negated.
    ///
    /// Ties resolve to the right inset.
    pub fn horizontal_bound(&self) -> f64 {
        if self.left.abs() > self.right.abs() {
            -self.left
        } else {
            -self.right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling() {
        let size = Size2D::new(200.0, 100.0);
        assert_eq!(size.scaled(0.5), Size2D::new(100.0, 50.0));
        assert_eq!(
            size.scaled_by(Size2D::new(2.0, 3.0)),
            Size2D::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_empty_size() {
        assert!(Size2D::ZERO.is_empty());
        assert!(Size2D::new(10.0, 0.0).is_empty());
        assert!(Size2D::new(f64::NAN, 5.0).is_empty());
        assert!(!Size2D::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_max_displacement() {
        assert_eq!(Vector2D::new(-12.0, 5.0).max_displacement(), 12.0);
        assert_eq!(Vector2D::new(3.0, -40.0).max_displacement(), 40.0);
        assert_eq!(Vector2D::ZERO.max_displacement(), 0.0);
    }

    #[test]
    fn test_bounds_pick_larger_magnitude() {
        let insets = Insets::new(0.0, 80.0, 30.0, 30.0);
        assert_eq!(insets.vertical_bound(), -80.0);
        assert_eq!(insets.horizontal_bound(), -30.0);

        let insets = Insets::new(60.0, 0.0, 0.0, 20.0);
        assert_eq!(insets.vertical_bound(), -60.0);
        assert_eq!(insets.horizontal_bound(), -20.0);
    }

    #[test]
    fn test_negative_insets_flip_sign() {
        // Image smaller than the viewport: negative insets become positive bounds.
        let insets = Insets::new(-25.0, -25.0, -10.0, -10.0);
        assert_eq!(insets.vertical_bound(), 25.0);
        assert_eq!(insets.horizontal_bound(), 10.0);
    }
}
