//! Geometric primitives for automaton layout and link routing.
//!
//! This module provides the fundamental geometric types used throughout
//! Quiver for simulating node positions and constructing link shapes.
//!
//! # Overview
//!
//! - [`Vec2`] - A 2D vector, used for both points and directions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`GeometryError`] - Typed failures for degenerate inputs
//!
//! # Coordinate System
//!
//! The simulation runs in a mathematical coordinate system:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **X-axis**: increases rightward
//! - **Y-axis**: increases upward
//! - **Angles**: counter-clockwise, in radians
//!
//! The export layer flips the Y-axis when mapping into SVG screen space;
//! nothing in this module knows about screen coordinates.

use std::f32::consts::TAU;

use thiserror::Error;

/// Length below which a vector is treated as zero.
///
/// Normalization, direction extraction, and rotation-angle computations on
/// vectors shorter than this fail with [`GeometryError::ZeroLengthVector`]
/// instead of producing NaN components.
pub const EPSILON: f32 = 1e-6;

/// Errors raised by geometric operations on degenerate inputs.
///
/// These indicate contract violations given a well-formed graph (for
/// example, two nodes occupying the same position). They are surfaced as
/// typed failures at the point of occurrence rather than propagating NaN
/// through the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A direction was requested from a vector of (near) zero length.
    #[error("cannot take the direction of a zero-length vector")]
    ZeroLengthVector,

    /// A vector was divided by a (near) zero scalar.
    #[error("division by zero")]
    DivisionByZero,

    /// No finite circle passes through three collinear points.
    #[error("no circle passes through three collinear points")]
    CollinearPoints,

    /// A triangle angle was requested with a zero-length adjacent side.
    #[error("triangle angle is undefined when an adjacent side has zero length")]
    DegenerateTriangle,
}

/// A 2D vector representing either a position or a direction.
///
/// All operations are value-preserving: methods take `self` by value and
/// return new vectors. The layout engine overwrites displacement
/// accumulators by assignment rather than in-place mutation.
///
/// # Examples
///
/// ```
/// # use quiver_core::geometry::Vec2;
/// let a = Vec2::new(3.0, 0.0);
/// let b = Vec2::new(0.0, 4.0);
///
/// assert_eq!(a.add(b), Vec2::new(3.0, 4.0));
/// assert_eq!(a.sub(b).length(), 5.0);
/// assert_eq!(a.midpoint(b), Vec2::new(1.5, 2.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    x: f32,
    y: f32,
}

impl Vec2 {
    /// Creates a new vector with the specified components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x component.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y component.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another vector, returning the sum.
    pub fn add(self, other: Vec2) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another vector, returning the difference.
    pub fn sub(self, other: Vec2) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both components by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Divides both components by the given divisor.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DivisionByZero`] when the divisor is below
    /// [`EPSILON`] in magnitude.
    pub fn div(self, divisor: f32) -> Result<Self, GeometryError> {
        if divisor.abs() < EPSILON {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(Self {
            x: self.x / divisor,
            y: self.y / divisor,
        })
    }

    /// Returns the dot product with another vector.
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Returns the scalar 2D cross product with another vector.
    ///
    /// Positive when `other` lies counter-clockwise of `self`. Used for
    /// orientation and arc sweep tests.
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the Euclidean length of the vector.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the distance to another point.
    pub fn distance(self, other: Vec2) -> f32 {
        other.sub(self).length()
    }

    /// Returns the point halfway between this point and another.
    pub fn midpoint(self, other: Vec2) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns the unit vector with the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthVector`] when the length is below
    /// [`EPSILON`].
    pub fn normalized(self) -> Result<Self, GeometryError> {
        let length = self.length();
        if length < EPSILON {
            return Err(GeometryError::ZeroLengthVector);
        }
        Ok(Self {
            x: self.x / length,
            y: self.y / length,
        })
    }

    /// Returns the unit vector perpendicular to this one.
    ///
    /// The result is the 90° counter-clockwise rotation of the vector,
    /// normalized.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthVector`] for a zero-length vector.
    pub fn perpendicular(self) -> Result<Self, GeometryError> {
        Self::new(-self.y, self.x).normalized()
    }

    /// Returns this vector rotated counter-clockwise by `angle` radians.
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Returns the angle between the vector and the positive x-axis.
    ///
    /// The result is in the range (−π, π]: positive above the axis,
    /// negative below it.
    pub fn signed_angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Returns the counter-clockwise angle from the positive x-axis.
    ///
    /// The result is always in the range [0, 2π).
    pub fn unsigned_angle(self) -> f32 {
        self.signed_angle().rem_euclid(TAU)
    }

    /// Returns the smallest signed rotation taking this vector onto the
    /// direction of `other`.
    ///
    /// Computed as `atan2(cross, dot)`, which stays exact across the ±π
    /// boundary where a naive angle subtraction wraps. The result is in
    /// (−π, π]: positive for a counter-clockwise rotation.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthVector`] when either vector has
    /// (near) zero length, since the rotation is then undefined.
    pub fn signed_rotation_angle(self, other: Vec2) -> Result<f32, GeometryError> {
        if self.length() < EPSILON || other.length() < EPSILON {
            return Err(GeometryError::ZeroLengthVector);
        }
        Ok(self.cross(other).atan2(self.dot(other)))
    }

    /// Returns the counter-clockwise rotation taking this vector onto the
    /// direction of `other`, in the range [0, 2π).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLengthVector`] when either vector has
    /// (near) zero length.
    pub fn unsigned_rotation_angle(self, other: Vec2) -> Result<f32, GeometryError> {
        Ok(self.signed_rotation_angle(other)?.rem_euclid(TAU))
    }
}

/// Recovers a triangle angle from its three side lengths.
///
/// Given the side `opposite` the angle and the two `adjacent` sides, this
/// applies the law of cosines. The cosine is clamped to [-1, 1] so that
/// float drift on flat triangles cannot produce NaN.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateTriangle`] when either adjacent side
/// has (near) zero length.
pub fn angle_from_sides(opposite: f32, adjacent1: f32, adjacent2: f32) -> Result<f32, GeometryError> {
    if adjacent1.abs() < EPSILON || adjacent2.abs() < EPSILON {
        return Err(GeometryError::DegenerateTriangle);
    }

    let cos = (adjacent1 * adjacent1 + adjacent2 * adjacent2 - opposite * opposite)
        / (2.0 * adjacent1 * adjacent2);

    Ok(cos.clamp(-1.0, 1.0).acos())
}

/// Returns the center of the unique circle through three non-collinear points.
///
/// Uses the closed-form intersection of two perpendicular bisectors. The
/// formulation is purely algebraic, so axis-aligned segments need no
/// special cases and no slope is ever divided by.
///
/// # Errors
///
/// Returns [`GeometryError::CollinearPoints`] when the points are
/// (near) collinear and no finite circle exists.
pub fn circumcenter(a: Vec2, b: Vec2, c: Vec2) -> Result<Vec2, GeometryError> {
    // Twice the signed area of the triangle; vanishes exactly when the
    // points are collinear.
    let d = 2.0
        * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() < EPSILON {
        return Err(GeometryError::CollinearPoints);
    }

    let a_sq = a.x * a.x + a.y * a.y;
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;

    let x = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
    let y = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

    Ok(Vec2::new(x, y))
}

/// A rectangular bounding box in simulation space.
///
/// Stored as minimum and maximum coordinates, which keeps box union and
/// expansion independent of the axis orientation. An empty box (all
/// corners at the origin) is the identity for [`Bounds::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the smallest box enclosing the given points.
    ///
    /// Returns the empty box when the iterator yields no points.
    pub fn enclosing<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut points = points.into_iter();

        let Some(first) = points.next() else {
            return Self::default();
        };

        points.fold(Self::around(first, 0.0), |bounds, point| {
            bounds.merge(&Self::around(point, 0.0))
        })
    }

    /// Creates the square box of half-side `radius` centered on `center`.
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            min_x: center.x() - radius,
            min_y: center.y() - radius,
            max_x: center.x() + radius,
            max_y: center.y() + radius,
        }
    }

    /// Returns the minimum x-coordinate of the bounds.
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds.
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds.
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds.
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds.
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds.
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner in simulation space (Y-up).
    pub fn top_left(self) -> Vec2 {
        Vec2::new(self.min_x, self.max_y)
    }

    /// Checks whether the point lies inside the bounds (inclusive).
    pub fn contains(self, point: Vec2) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    /// Merges two bounds into the smallest box containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `margin` on every side.
    pub fn expand(self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}
