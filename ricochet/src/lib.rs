//! Mirror-bounce path tracing in the plane.
//!
//! A ray (or a rigid, axis-aligned rectangle) travels along a direction for a
//! finite distance, and bounces off whatever [`Environment`] it runs into,
//! until it either escapes into open space, runs out of travel distance, or
//! hits the segment cap of its [`TraceConfig`].

mod config;
mod environment;
mod error;
mod projector;
mod reflection;
mod segment;
mod tracer;

pub use config::*;
pub use environment::*;
pub use error::*;
pub use projector::*;
pub use reflection::*;
pub use segment::*;
pub use tracer::*;

pub use either;
pub use nalgebra;

use nalgebra::{Point2, Unit, Vector2};

pub type Float = f64;

/// A position in the plane.
pub type Point = Point2<Float>;

/// A displacement in the plane.
pub type Vector = Vector2<Float>;

/// A unit-length [`Vector`].
pub type Direction = Unit<Vector>;

/// A ray, represented as a half-line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Point,
    /// The direction of the half-line
    pub dir: Direction,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, dir: Direction) -> Self {
        Self {
            origin: origin.into(),
            dir,
        }
    }

    /// Returns `None` if `dir` is (almost) the zero vector, or isn't finite.
    #[inline]
    #[must_use]
    pub fn try_new(origin: impl Into<Point>, dir: impl Into<Vector>) -> Option<Self> {
        try_direction(dir).map(|dir| Self::new(origin, dir))
    }

    /// Returns [`self.origin`](Self::origin), translated by [`self.dir`](Self::dir)`* t`.
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Point {
        self.origin + self.dir.as_ref() * t
    }
}

/// Normalizes `v`, returns `None` if it is (almost) zero, or has non-finite coordinates.
#[inline]
#[must_use]
pub fn try_direction(v: impl Into<Vector>) -> Option<Direction> {
    let v = v.into();
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }

    // rescale first, squaring huge or tiny coordinates under/overflows the norm
    let scale = v.amax();
    if !(scale > Float::EPSILON) {
        return None;
    }
    Unit::try_new(v / scale, Float::EPSILON)
}
