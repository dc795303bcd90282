use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 2D vector for physics calculations.
///
/// Two surfaces are provided: in-place chaining methods (`add_mut`,
/// `normalize_mut`, ...) that mutate and return `&mut Self`, and a pure
/// surface of operators and methods that return new values. Degenerate
/// scalar divisions degrade instead of failing: dividing by zero logs a
/// warning and leaves the vector unchanged (in place) or yields a zero
/// vector (pure), so solver code never has to guard the division itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Creates a new 2D vector
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a new 2D vector with both components set to zero
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Creates a vector from an angle (radians) and magnitude
    #[inline]
    pub fn from_angle(angle: f32, magnitude: f32) -> Self {
        Self {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }

    /// Creates a unit vector pointing in a uniformly random direction
    pub fn random() -> Self {
        let angle = rand::random::<f32>() * std::f32::consts::TAU;
        Self::from_angle(angle, 1.0)
    }

    /// Computes the dot product of two vectors
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the scalar cross product of two 2D vectors
    #[inline]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the squared length of the vector
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the length of the vector
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the angle of this vector in radians, in the range [-PI, PI]
    #[inline]
    pub fn heading(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Returns a normalized version of the vector.
    /// A zero vector is returned unchanged.
    #[inline]
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length > 0.0 {
            Self::new(self.x / length, self.y / length)
        } else {
            *self
        }
    }

    /// Distance between two vectors
    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Squared distance between two vectors
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        (*self - *other).length_squared()
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }

    /// Returns this vector rotated by `angle` radians.
    ///
    /// Implemented by reconstructing from heading and magnitude rather than
    /// a rotation matrix, matching the in-place variant.
    #[inline]
    pub fn rotate(&self, angle: f32) -> Self {
        let mut out = *self;
        out.rotate_mut(angle);
        out
    }

    /// Returns true if the vector is approximately zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        crate::math::approx_zero(self.length_squared())
    }

    /// Convert to nalgebra Vector2
    #[inline]
    pub fn to_nalgebra(&self) -> na::Vector2<f32> {
        na::Vector2::new(self.x, self.y)
    }

    /// Convert from nalgebra Vector2
    #[inline]
    pub fn from_nalgebra(v: &na::Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }

    // === In-place chaining surface ===

    /// Sets both components (in place)
    #[inline]
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Adds another vector to this vector (in place)
    #[inline]
    pub fn add_mut(&mut self, v: Vec2) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    /// Subtracts another vector from this vector (in place)
    #[inline]
    pub fn sub_mut(&mut self, v: Vec2) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    /// Multiplies this vector by a scalar (in place)
    #[inline]
    pub fn mul_mut(&mut self, n: f32) -> &mut Self {
        self.x *= n;
        self.y *= n;
        self
    }

    /// Divides this vector by a scalar (in place).
    /// Dividing by zero logs a warning and leaves the vector unchanged.
    #[inline]
    pub fn div_mut(&mut self, n: f32) -> &mut Self {
        if n == 0.0 {
            log::warn!("Vec2::div_mut: division by zero, vector unchanged");
            return self;
        }
        self.x /= n;
        self.y /= n;
        self
    }

    /// Normalizes the vector in place. A zero vector is left unchanged.
    #[inline]
    pub fn normalize_mut(&mut self) -> &mut Self {
        let length = self.length();
        if length > 0.0 {
            self.div_mut(length);
        }
        self
    }

    /// Limits the magnitude of this vector to a maximum value (in place)
    #[inline]
    pub fn limit_mut(&mut self, max: f32) -> &mut Self {
        if self.length_squared() > max * max {
            self.normalize_mut().mul_mut(max);
        }
        self
    }

    /// Sets the magnitude of this vector (in place)
    #[inline]
    pub fn set_mag_mut(&mut self, len: f32) -> &mut Self {
        self.normalize_mut().mul_mut(len)
    }

    /// Rotates this vector by `angle` radians (in place), reconstructing
    /// from heading and magnitude.
    #[inline]
    pub fn rotate_mut(&mut self, angle: f32) -> &mut Self {
        let heading = self.heading() + angle;
        let mag = self.length();
        self.x = heading.cos() * mag;
        self.y = heading.sin() * mag;
        self
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from(array: [f32; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl From<Vec2> for [f32; 2] {
    #[inline]
    fn from(vector: Vec2) -> Self {
        [vector.x, vector.y]
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    /// Dividing by zero logs a warning and yields a zero vector.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        if rhs == 0.0 {
            log::warn!("Vec2: division by zero, returning zero vector");
            return Self::zero();
        }
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<f32> for Vec2 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        if rhs == 0.0 {
            log::warn!("Vec2: division by zero, vector unchanged");
            return;
        }
        self.x /= rhs;
        self.y /= rhs;
    }
}
