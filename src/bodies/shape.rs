#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A collision shape. The shape set is closed: detector dispatch matches
/// exhaustively over circle/rectangle combinations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    /// Creates a circle shape with the given radius
    pub fn circle(radius: f32) -> Self {
        Self::Circle {
            radius: radius.max(0.0),
        }
    }

    /// Creates a rectangle shape with the given extents
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::Rectangle {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Returns the moment of inertia of the shape for the given mass.
    ///
    /// Zero extents fall back to 1 so a degenerate shape still yields a
    /// finite inertia.
    pub fn inertia(&self, mass: f32) -> f32 {
        match *self {
            Shape::Circle { radius } => {
                let r = if radius > 0.0 { radius } else { 1.0 };
                0.5 * mass * r * r
            }
            Shape::Rectangle { width, height } => {
                let w = if width > 0.0 { width } else { 1.0 };
                let h = if height > 0.0 { height } else { 1.0 };
                (1.0 / 12.0) * mass * (w * w + h * h)
            }
        }
    }
}
