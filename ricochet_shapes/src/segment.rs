use ricochet::nalgebra::Matrix2;

use super::*;

/// A line segment mirror, reflective on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Returns `None` if `start` and `end` are (almost) equal, or aren't finite.
    #[inline]
    #[must_use]
    pub fn try_new(start: impl Into<Point>, end: impl Into<Point>) -> Option<Self> {
        let (start, end) = (start.into(), end.into());
        try_direction(end - start).map(|_| Self { start, end })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `start` and `end` are (almost) equal, or aren't finite.
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self::try_new(start, end).expect("segment endpoints must be distinct and finite")
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> &Point {
        &self.end
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> Float {
        (self.end - self.start).norm()
    }

    /// The normal obtained by rotating `end - start` a quarter turn counterclockwise.
    #[inline]
    #[must_use]
    pub fn normal(&self) -> Direction {
        let [x, y]: [Float; 2] = (self.end - self.start).into();
        Direction::new_normalize(Vector::new(-y, x))
    }

    /// Returns the distance `d` such that [`ray.at(d)`](Ray::at) intersects with `self`.
    ///
    /// `d` may be negative. Rays parallel to `self` never intersect it.
    #[inline]
    #[must_use]
    pub fn intersection(&self, ray: &Ray) -> Option<Float> {
        let edge = self.end - self.start;
        // solving `origin + t * dir = start + u * edge` for `(t, u)`
        let a = Matrix2::from_columns(&[ray.dir.into_inner(), -edge]);

        a.try_inverse().and_then(|inv| {
            let [t, u]: [Float; 2] = (inv * (self.start - ray.origin)).into();
            (0. ..=1.).contains(&u).then_some(t)
        })
    }
}

impl Environment for Segment {
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        let ray = ctx.ray();
        if let Some(t) = self.intersection(ray) {
            ctx.add_hit(t, facing(self.normal(), &ray.dir));
        }
    }
}
