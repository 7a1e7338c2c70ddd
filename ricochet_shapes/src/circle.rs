use arrayvec::ArrayVec;

use super::*;

/// All points at a certain distance (`radius`) from a certain point (`center`).
///
/// Reflective on both sides: rays can bounce around inside it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Circle {
    pub center: Point,
    radius: Float,
    radius_sq: Float,
}

impl Circle {
    /// Returns `None` if `radius` isn't finite and positive, or `center` isn't finite.
    #[inline]
    #[must_use]
    pub fn try_new(center: impl Into<Point>, radius: Float) -> Option<Self> {
        let center = center.into();
        let valid = radius.is_finite() && radius > 0. && center.iter().all(|c| c.is_finite());

        valid.then(|| Self {
            center,
            radius,
            radius_sq: radius * radius,
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `radius` isn't finite and positive, or `center` isn't finite.
    #[inline]
    #[must_use]
    pub fn new(center: impl Into<Point>, radius: Float) -> Self {
        Self::try_new(center, radius).expect("circle radius must be finite and positive")
    }

    #[inline]
    #[must_use]
    pub const fn radius(&self) -> Float {
        self.radius
    }

    /// Both distances `d` (possibly negative) such that [`ray.at(d)`](Ray::at)
    /// lies on `self`, in increasing order.
    #[inline]
    #[must_use]
    pub fn intersections(&self, ray: &Ray) -> Option<[Float; 2]> {
        // substituting `P` for `O + t * D` in the circle equation:
        // `||P - C||^2 = r^2` results in a quadratic equation in `t`.
        // `D` has unit length, so the leading coefficient is 1.

        let v = ray.origin - self.center;

        let b = v.dot(ray.dir.as_ref());
        let c = v.norm_squared() - self.radius_sq;

        let delta = b.mul_add(b, -c);

        (delta >= 0.).then(|| {
            let root = delta.sqrt();
            [-b - root, -b + root]
        })
    }

    /// Returns up to two pairs `(d, n)`, such that [`ray.at(d)`](Ray::at) lies
    /// on `self`, and `n` is the normal to `self` at that point, facing outwards.
    ///
    /// A tangent ray is reported twice.
    #[inline]
    #[must_use]
    pub fn normals_at_intersections(&self, ray: &Ray) -> ArrayVec<(Float, Direction), 2> {
        self.intersections(ray)
            .into_iter()
            .flatten()
            .filter_map(|d| try_direction(ray.at(d) - self.center).map(|n| (d, n)))
            .collect()
    }
}

impl Environment for Circle {
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        let ray = ctx.ray();
        for (d, n) in self.normals_at_intersections(ray) {
            ctx.add_hit(d, facing(n, &ray.dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ray(origin: [Float; 2], dir: [Float; 2]) -> Ray {
        Ray::try_new(origin, dir).unwrap()
    }

    #[test]
    fn rejects_bad_radii() {
        assert!(Circle::try_new([0., 0.], 0.).is_none());
        assert!(Circle::try_new([0., 0.], -1.).is_none());
        assert!(Circle::try_new([0., 0.], Float::INFINITY).is_none());
        assert_eq!(Circle::new([1., 2.], 3.).radius(), 3.);
    }

    #[test]
    fn intersections_are_sorted() {
        let c = Circle::new([3., 0.], 1.);

        let [near, far] = c.intersections(&ray([0., 0.], [1., 0.])).unwrap();
        assert_relative_eq!(near, 2.);
        assert_relative_eq!(far, 4.);

        assert!(c.intersections(&ray([0., 2.], [1., 0.])).is_none());
        assert_eq!(c.normals_at_intersections(&ray([0., 0.], [-1., 0.])).len(), 2);
    }

    #[test]
    fn hit_from_outside() {
        let c = Circle::new([3., 0.], 1.);
        let hit = c.query(&ray([0., 0.], [1., 0.]), 10.).unwrap();

        assert_relative_eq!(hit.distance, 2.);
        assert_relative_eq!(hit.normal.into_inner(), Vector::new(-1., 0.));

        // facing away
        assert!(c.query(&ray([0., 0.], [-1., 0.]), 10.).is_none());
    }

    #[test]
    fn hit_from_inside() {
        let c = Circle::new([0., 0.], 2.);
        let hit = c.query(&ray([0., 0.], [0., 1.]), 10.).unwrap();

        assert_relative_eq!(hit.distance, 2.);
        assert_relative_eq!(hit.point, Point::new(0., 2.));
        assert_relative_eq!(hit.normal.into_inner(), Vector::new(0., -1.));
    }

    #[test]
    fn rays_stay_trapped_inside() {
        let c = Circle::new([1., -1.], 3.);
        let config = TraceConfig::default();

        for deg in (0..360).step_by(17) {
            let path = trace_single_ray(
                &c,
                [1.5, -0.5],
                aim_direction(deg as Float).into_inner(),
                50.,
                &config,
            )
            .unwrap();

            assert!(path.len() > 1);
            for p in path.points() {
                assert!((p - c.center).norm() <= 3. + 1e-9, "{p} escaped");
            }
        }
    }
}
